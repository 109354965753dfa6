//! Generic proof DAG rewriting.
//!
//! [`ProofRewriter`] walks a proof children first and hands every node to a
//! [`ProofTranslator`], which writes replacement steps into a target
//! [`ProofStore`]. Rewrites are memoized by conclusion, so a fact reached
//! through several parents, or through structurally equal but distinct
//! nodes, is rewritten once and every parent ends up sharing one result.

use crate::node::{ProofNode, ProofNodeRef};
use crate::store::ProofStore;
use certiz_core::{FactId, FactManager, OptionProofExt, ProofConfig, ProofError, Result};
use rustc_hash::FxHashMap;
use std::rc::Rc;
use tracing::{debug, warn};

/// Statistics for rewriting operations.
#[derive(Debug, Clone, Default)]
pub struct RewriteStats {
    /// Number of distinct conclusions visited.
    pub nodes_visited: u64,
    /// Number of nodes handed to the translator.
    pub nodes_translated: u64,
    /// Number of nodes kept as they were.
    pub nodes_kept: u64,
    /// Number of cache hits.
    pub cache_hits: u64,
    /// Number of cache misses.
    pub cache_misses: u64,
}

impl RewriteStats {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Compute cache hit rate.
    pub fn cache_hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }
}

/// Configuration for rewriting.
#[derive(Debug, Clone)]
pub struct RewriteConfig {
    /// Maximum depth for recursive rewriting.
    pub max_depth: usize,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self { max_depth: 100_000 }
    }
}

impl From<&ProofConfig> for RewriteConfig {
    fn from(config: &ProofConfig) -> Self {
        Self {
            max_depth: config.max_rewrite_depth,
        }
    }
}

/// Translation callback driven by [`ProofRewriter`].
pub trait ProofTranslator {
    /// Get the name of this translator.
    fn name(&self) -> &str;

    /// Decide whether `node` must be rewritten. Nodes for which this returns
    /// `false` are kept, together with their whole sub-proof.
    fn should_translate(&self, fm: &FactManager, node: &ProofNode) -> bool;

    /// Write the replacement of `node` into `target`, keyed by its
    /// conclusion. Every premise conclusion already has a proof in `target`.
    ///
    /// `node` is the original node, so its children expose how each premise
    /// was derived before rewriting. Returns `false` if nothing was written.
    fn translate(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNodeRef,
        target: &mut ProofStore,
    ) -> Result<bool>;

    /// Post-process the rewritten root.
    fn finish(
        &mut self,
        _fm: &mut FactManager,
        root: ProofNodeRef,
        _target: &mut ProofStore,
    ) -> Result<ProofNodeRef> {
        Ok(root)
    }
}

/// Children-first, conclusion-memoized proof rewriter.
#[derive(Debug, Default)]
pub struct ProofRewriter {
    config: RewriteConfig,
    stats: RewriteStats,
    cache: FxHashMap<FactId, ProofNodeRef>,
}

impl ProofRewriter {
    /// Create a rewriter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rewriter with the given configuration.
    pub fn with_config(config: RewriteConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Get statistics.
    pub fn stats(&self) -> &RewriteStats {
        &self.stats
    }

    /// Rewrite the proof rooted at `root` into `target` and return the
    /// rewritten root.
    pub fn process(
        &mut self,
        fm: &mut FactManager,
        root: &ProofNodeRef,
        translator: &mut dyn ProofTranslator,
        target: &mut ProofStore,
    ) -> Result<ProofNodeRef> {
        self.cache.clear();
        debug!(
            "{} rewriting proof of {}",
            translator.name(),
            fm.display(root.conclusion())
        );
        let rewritten = self.rewrite(fm, root, translator, target, 0)?;
        translator.finish(fm, rewritten, target)
    }

    fn rewrite(
        &mut self,
        fm: &mut FactManager,
        node: &ProofNodeRef,
        translator: &mut dyn ProofTranslator,
        target: &mut ProofStore,
        depth: usize,
    ) -> Result<ProofNodeRef> {
        if depth >= self.config.max_depth {
            return Err(ProofError::State(format!(
                "proof deeper than {} steps",
                self.config.max_depth
            )));
        }
        let conclusion = node.conclusion();
        if let Some(done) = self.cache.get(&conclusion) {
            self.stats.cache_hits += 1;
            return Ok(Rc::clone(done));
        }
        self.stats.cache_misses += 1;
        self.stats.nodes_visited += 1;

        if !translator.should_translate(fm, node) {
            self.stats.nodes_kept += 1;
            let kept = target.insert_node(Rc::clone(node));
            self.cache.insert(conclusion, Rc::clone(&kept));
            return Ok(kept);
        }

        for child in node.children() {
            self.rewrite(fm, child, translator, target, depth + 1)?;
        }

        if translator.translate(fm, node, target)? {
            self.stats.nodes_translated += 1;
        } else {
            warn!(
                "{} left {} untranslated",
                translator.name(),
                fm.display(conclusion)
            );
            self.stats.nodes_kept += 1;
            target.insert_node(Rc::clone(node));
        }

        let rewritten = target.get_proof_for(conclusion).or_unknown(fm, conclusion)?;
        self.cache.insert(conclusion, Rc::clone(&rewritten));
        Ok(rewritten)
    }
}
