//! Hash-consed facts.
//!
//! A fact is a formula or term value that a proof step concludes. Facts are
//! interned in a [`FactManager`] so that structurally equal facts always share
//! the same [`FactId`]; comparing handles is therefore structural equality.
//!
//! Constructors never simplify. `mk_not(mk_not(p))` is a double negation and
//! `mk_or(vec![p])` is a one-child disjunction, because proof rules must be
//! able to talk about exactly those shapes.

use lasso::{Rodeo, Spur};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;

/// Child list of an n-ary fact.
pub type FactList = SmallVec<[FactId; 4]>;

/// Handle to an interned fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FactId(u32);

impl FactId {
    /// Create a handle from its raw index.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@f{}", self.0)
    }
}

/// Shape of a fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FactKind {
    /// The constant `true`
    True,
    /// The constant `false`
    False,
    /// A named Boolean or uninterpreted constant
    Var(Spur),
    /// An integer constant, used for rule arguments such as indices
    Int(i64),
    /// Negation
    Not(FactId),
    /// N-ary conjunction
    And(FactList),
    /// N-ary disjunction
    Or(FactList),
    /// Implication `(=> a b)`
    Implies([FactId; 2]),
    /// Equality `(= a b)`, also used for Boolean equivalence
    Eq([FactId; 2]),
    /// Exclusive or
    Xor([FactId; 2]),
    /// If-then-else `(ite c t e)`
    Ite([FactId; 3]),
    /// Application of an uninterpreted symbol
    App(Spur, FactList),
    /// Clause of the target calculus, `(cl l1 ... ln)`
    Clause(FactList),
}

/// Interning table for facts.
#[derive(Debug)]
pub struct FactManager {
    facts: Vec<FactKind>,
    cache: FxHashMap<FactKind, FactId>,
    names: Rodeo,
    true_id: FactId,
    false_id: FactId,
}

impl Default for FactManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FactManager {
    /// Create a manager holding only the two Boolean constants.
    pub fn new() -> Self {
        let mut fm = Self {
            facts: Vec::new(),
            cache: FxHashMap::default(),
            names: Rodeo::default(),
            true_id: FactId(0),
            false_id: FactId(0),
        };
        fm.true_id = fm.intern(FactKind::True);
        fm.false_id = fm.intern(FactKind::False);
        fm
    }

    fn intern(&mut self, kind: FactKind) -> FactId {
        if let Some(&id) = self.cache.get(&kind) {
            return id;
        }
        let id = FactId(self.facts.len() as u32);
        self.facts.push(kind.clone());
        self.cache.insert(kind, id);
        id
    }

    /// Number of interned facts.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Check whether only the constants have been interned.
    pub fn is_empty(&self) -> bool {
        self.facts.len() <= 2
    }

    /// Look up a fact, returning `None` for handles from another manager.
    pub fn get(&self, id: FactId) -> Option<&FactKind> {
        self.facts.get(id.0 as usize)
    }

    /// Shape of a fact.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not created by this manager.
    pub fn kind(&self, id: FactId) -> &FactKind {
        &self.facts[id.0 as usize]
    }

    /// The constant `true`.
    #[must_use]
    pub fn mk_true(&self) -> FactId {
        self.true_id
    }

    /// The constant `false`.
    #[must_use]
    pub fn mk_false(&self) -> FactId {
        self.false_id
    }

    /// A Boolean constant.
    #[must_use]
    pub fn mk_bool(&self, value: bool) -> FactId {
        if value { self.true_id } else { self.false_id }
    }

    /// A named constant.
    pub fn mk_var(&mut self, name: &str) -> FactId {
        let sym = self.names.get_or_intern(name);
        self.intern(FactKind::Var(sym))
    }

    /// An integer constant.
    pub fn mk_int(&mut self, value: i64) -> FactId {
        self.intern(FactKind::Int(value))
    }

    /// Negation of `a`.
    pub fn mk_not(&mut self, a: FactId) -> FactId {
        self.intern(FactKind::Not(a))
    }

    /// Conjunction of `args`.
    pub fn mk_and(&mut self, args: impl IntoIterator<Item = FactId>) -> FactId {
        self.intern(FactKind::And(args.into_iter().collect()))
    }

    /// Disjunction of `args`.
    pub fn mk_or(&mut self, args: impl IntoIterator<Item = FactId>) -> FactId {
        self.intern(FactKind::Or(args.into_iter().collect()))
    }

    /// Implication `(=> a b)`.
    pub fn mk_implies(&mut self, a: FactId, b: FactId) -> FactId {
        self.intern(FactKind::Implies([a, b]))
    }

    /// Equality `(= a b)`.
    pub fn mk_eq(&mut self, a: FactId, b: FactId) -> FactId {
        self.intern(FactKind::Eq([a, b]))
    }

    /// Exclusive or `(xor a b)`.
    pub fn mk_xor(&mut self, a: FactId, b: FactId) -> FactId {
        self.intern(FactKind::Xor([a, b]))
    }

    /// If-then-else `(ite c t e)`.
    pub fn mk_ite(&mut self, c: FactId, t: FactId, e: FactId) -> FactId {
        self.intern(FactKind::Ite([c, t, e]))
    }

    /// Application of the uninterpreted symbol `name`.
    pub fn mk_app(&mut self, name: &str, args: impl IntoIterator<Item = FactId>) -> FactId {
        let sym = self.names.get_or_intern(name);
        self.intern(FactKind::App(sym, args.into_iter().collect()))
    }

    /// Target calculus clause `(cl lits...)`.
    pub fn mk_clause(&mut self, lits: impl IntoIterator<Item = FactId>) -> FactId {
        self.intern(FactKind::Clause(lits.into_iter().collect()))
    }

    /// Direct children of a fact; empty for leaves.
    pub fn children(&self, id: FactId) -> &[FactId] {
        match self.kind(id) {
            FactKind::Not(a) => std::slice::from_ref(a),
            FactKind::And(args)
            | FactKind::Or(args)
            | FactKind::App(_, args)
            | FactKind::Clause(args) => args.as_slice(),
            FactKind::Implies(args) | FactKind::Eq(args) | FactKind::Xor(args) => args.as_slice(),
            FactKind::Ite(args) => args.as_slice(),
            FactKind::True | FactKind::False | FactKind::Var(_) | FactKind::Int(_) => &[],
        }
    }

    /// Check if the fact is `false`.
    pub fn is_false(&self, id: FactId) -> bool {
        id == self.false_id
    }

    /// Check if the fact is `true`.
    pub fn is_true(&self, id: FactId) -> bool {
        id == self.true_id
    }

    /// Check if the fact is a disjunction.
    pub fn is_or(&self, id: FactId) -> bool {
        matches!(self.kind(id), FactKind::Or(_))
    }

    /// Check if the fact is a negation.
    pub fn is_not(&self, id: FactId) -> bool {
        matches!(self.kind(id), FactKind::Not(_))
    }

    /// Check if the fact is a target calculus clause.
    pub fn is_clause(&self, id: FactId) -> bool {
        matches!(self.kind(id), FactKind::Clause(_))
    }

    /// The negated fact if `id` is a negation.
    pub fn not_inner(&self, id: FactId) -> Option<FactId> {
        match self.kind(id) {
            FactKind::Not(a) => Some(*a),
            _ => None,
        }
    }

    /// Strip at most one negation.
    pub fn atom(&self, id: FactId) -> FactId {
        self.not_inner(id).unwrap_or(id)
    }

    /// Value of a Boolean constant.
    pub fn as_bool(&self, id: FactId) -> Option<bool> {
        match self.kind(id) {
            FactKind::True => Some(true),
            FactKind::False => Some(false),
            _ => None,
        }
    }

    /// Value of an integer constant.
    pub fn as_int(&self, id: FactId) -> Option<i64> {
        match self.kind(id) {
            FactKind::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Symbol name of a constant or application.
    pub fn name(&self, id: FactId) -> Option<&str> {
        match self.kind(id) {
            FactKind::Var(sym) | FactKind::App(sym, _) => Some(self.names.resolve(sym)),
            _ => None,
        }
    }

    /// Printable view of a fact in SMT-LIB syntax.
    pub fn display(&self, id: FactId) -> FactDisplay<'_> {
        FactDisplay { fm: self, id }
    }

    /// Printable view of a list of facts, separated by spaces.
    pub fn display_list(&self, ids: &[FactId]) -> String {
        ids.iter()
            .map(|&id| self.display(id).to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn write_fact(&self, f: &mut fmt::Formatter<'_>, id: FactId) -> fmt::Result {
        let Some(kind) = self.get(id) else {
            return write!(f, "{}", id);
        };
        let (head, args): (&str, &[FactId]) = match kind {
            FactKind::True => return write!(f, "true"),
            FactKind::False => return write!(f, "false"),
            FactKind::Var(sym) => return write!(f, "{}", self.names.resolve(sym)),
            FactKind::Int(n) if *n < 0 => return write!(f, "(- {})", n.unsigned_abs()),
            FactKind::Int(n) => return write!(f, "{}", n),
            FactKind::App(sym, args) if args.is_empty() => {
                return write!(f, "{}", self.names.resolve(sym));
            }
            FactKind::App(sym, args) => (self.names.resolve(sym), args.as_slice()),
            FactKind::Not(a) => ("not", std::slice::from_ref(a)),
            FactKind::And(args) => ("and", args.as_slice()),
            FactKind::Or(args) => ("or", args.as_slice()),
            FactKind::Implies(args) => ("=>", args.as_slice()),
            FactKind::Eq(args) => ("=", args.as_slice()),
            FactKind::Xor(args) => ("xor", args.as_slice()),
            FactKind::Ite(args) => ("ite", args.as_slice()),
            FactKind::Clause(args) => ("cl", args.as_slice()),
        };
        write!(f, "({}", head)?;
        for &arg in args {
            write!(f, " ")?;
            self.write_fact(f, arg)?;
        }
        write!(f, ")")
    }
}

/// Display adapter returned by [`FactManager::display`].
pub struct FactDisplay<'a> {
    fm: &'a FactManager,
    id: FactId,
}

impl fmt::Display for FactDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fm.write_fact(f, self.id)
    }
}
