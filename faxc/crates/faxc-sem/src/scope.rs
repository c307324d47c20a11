use crate::types::SymbolEntry;
use faxc_util::{FxHashMap, Idx, IndexVec, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RibId(u32);

impl Idx for RibId {
    fn from_usize(idx: usize) -> Self {
        RibId(idx as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy)]
pub enum RibKind {
    Module,
    Function,
    Block,
    For,
}

#[derive(Debug)]
pub struct Rib {
    bindings: FxHashMap<Symbol, SymbolEntry>,
    parent: Option<RibId>,
    kind: RibKind,
}

/// A tree of lexical scopes. Scopes are entered at a Program's root,
/// each function body, each `CompoundStmt`, and each `ForStmt`; `lookup`
/// walks from the current rib to the root.
pub struct ScopeTree {
    ribs: IndexVec<RibId, Rib>,
    current: RibId,
}

impl ScopeTree {
    pub fn new() -> Self {
        let mut ribs = IndexVec::new();
        let root = ribs.push(Rib { bindings: FxHashMap::default(), parent: None, kind: RibKind::Module });
        Self { ribs, current: root }
    }

    pub fn enter_scope(&mut self, kind: RibKind) -> RibId {
        let rib = self.ribs.push(Rib { bindings: FxHashMap::default(), parent: Some(self.current), kind });
        self.current = rib;
        rib
    }

    /// Exits the current scope, restoring the parent recorded on entry.
    /// The global scope (no parent) is never exited.
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.ribs[self.current].parent {
            self.current = parent;
        }
    }

    pub fn current_kind(&self) -> RibKind {
        self.ribs[self.current].kind
    }

    /// Binds `name` in the current scope. Returns `false` without
    /// changing anything if `name` is already bound there — redeclaration
    /// in the same scope is an error; the caller decides how to report it.
    pub fn declare(&mut self, name: Symbol, entry: SymbolEntry) -> bool {
        let rib = &mut self.ribs[self.current];
        if rib.bindings.contains_key(&name) {
            return false;
        }
        rib.bindings.insert(name, entry);
        true
    }

    /// Resolves `name` by walking from the current scope to the root.
    pub fn resolve(&self, name: Symbol) -> Option<&SymbolEntry> {
        let mut rib_id = self.current;
        loop {
            let rib = &self.ribs[rib_id];
            if let Some(entry) = rib.bindings.get(&name) {
                return Some(entry);
            }
            rib_id = rib.parent?;
        }
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeKind;

    fn sym(n: u32) -> Symbol {
        // Tests only need distinct handles; faxc_util::Symbol's only
        // public constructor is interning, so interning fixed text
        // here plays that role.
        let mut interner = faxc_util::Interner::new();
        interner.intern(&format!("s{n}"))
    }

    #[test]
    fn shadowing_across_scopes_is_allowed() {
        let mut tree = ScopeTree::new();
        let name = sym(1);
        assert!(tree.declare(name, SymbolEntry::variable(TypeKind::Int)));
        tree.enter_scope(RibKind::Block);
        assert!(tree.declare(name, SymbolEntry::variable(TypeKind::Char)));
        assert_eq!(tree.resolve(name).unwrap().ty, TypeKind::Char);
        tree.exit_scope();
        assert_eq!(tree.resolve(name).unwrap().ty, TypeKind::Int);
    }

    #[test]
    fn redeclaration_in_the_same_scope_is_rejected() {
        let mut tree = ScopeTree::new();
        let name = sym(2);
        assert!(tree.declare(name, SymbolEntry::variable(TypeKind::Int)));
        assert!(!tree.declare(name, SymbolEntry::variable(TypeKind::Int)));
    }

    #[test]
    fn exiting_the_global_scope_is_a_no_op() {
        let mut tree = ScopeTree::new();
        tree.exit_scope();
        assert!(matches!(tree.current_kind(), RibKind::Module));
    }

    #[test]
    fn lookup_walks_up_to_the_root() {
        let mut tree = ScopeTree::new();
        let name = sym(3);
        tree.declare(name, SymbolEntry::variable(TypeKind::Int));
        tree.enter_scope(RibKind::Block);
        tree.enter_scope(RibKind::Block);
        assert!(tree.resolve(name).is_some());
    }
}
