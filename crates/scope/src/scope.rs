use qp_ast::NodeID;
use qp_atom::AtomId;
use qp_span::Span;
use qp_utils::FxIndexMap;
use rustc_hash::FxHashMap;

qp_utils::index!(ScopeID);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Program,
    Function,
    Arrow,
    Getter,
    Setter,
    Catch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
    /// The binding identifier that introduced the name.
    Node { id: NodeID, span: Span },
    /// Host globals and `arguments`. References to them stay unbound.
    Implicit,
}

impl Declaration {
    pub fn node(&self) -> Option<NodeID> {
        match self {
            Declaration::Node { id, .. } => Some(*id),
            Declaration::Implicit => None,
        }
    }
}

#[derive(Debug)]
pub struct Scope {
    pub parent: Option<ScopeID>,
    pub children: Vec<ScopeID>,
    /// The construct that introduced the scope.
    pub node: NodeID,
    pub kind: ScopeKind,
    pub(crate) declarations: FxIndexMap<AtomId, Declaration>,
}

impl Scope {
    pub fn get(&self, name: AtomId) -> Option<Declaration> {
        self.declarations.get(&name).copied()
    }

    /// Declarations in the order they were made.
    pub fn declarations(&self) -> impl Iterator<Item = (AtomId, Declaration)> + '_ {
        self.declarations.iter().map(|(&name, &decl)| (name, decl))
    }
}

#[derive(Debug, Default)]
pub struct ScopeTree {
    pub(crate) scopes: Vec<Scope>,
    pub(crate) node_scope: FxHashMap<NodeID, ScopeID>,
    pub(crate) decl_scope: FxHashMap<NodeID, ScopeID>,
    pub(crate) references: FxHashMap<NodeID, Vec<NodeID>>,
    pub(crate) resolved: FxHashMap<NodeID, NodeID>,
    pub diags: Vec<qp_errors::Diag>,
}

impl ScopeTree {
    pub(crate) fn new_scope(&mut self, parent: Option<ScopeID>, node: NodeID, kind: ScopeKind) -> ScopeID {
        let id = ScopeID::from_usize(self.scopes.len());
        self.scopes.push(Scope {
            parent,
            children: Vec::new(),
            node,
            kind,
            declarations: qp_utils::fx_indexmap_with_capacity(4),
        });
        if let Some(parent) = parent {
            self.scopes[parent.as_usize()].children.push(id);
        }
        let prev = self.node_scope.insert(node, id);
        debug_assert!(prev.is_none());
        id
    }

    pub fn root(&self) -> ScopeID {
        ScopeID::root()
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn scope(&self, id: ScopeID) -> &Scope {
        &self.scopes[id.as_usize()]
    }

    pub fn scopes(&self) -> impl Iterator<Item = (ScopeID, &Scope)> {
        self.scopes
            .iter()
            .enumerate()
            .map(|(idx, scope)| (ScopeID::from_usize(idx), scope))
    }

    /// The scope introduced by `node`, if it introduces one.
    pub fn scope_of(&self, node: NodeID) -> Option<ScopeID> {
        self.node_scope.get(&node).copied()
    }

    /// The scope a declaration was first made in.
    pub fn owner_of(&self, decl: NodeID) -> Option<ScopeID> {
        self.decl_scope.get(&decl).copied()
    }

    /// The declaration `reference` is bound to. `None` means a host symbol.
    pub fn resolved(&self, reference: NodeID) -> Option<NodeID> {
        self.resolved.get(&reference).copied()
    }

    /// References bound to `decl`, in walk order.
    pub fn references_of(&self, decl: NodeID) -> &[NodeID] {
        self.references.get(&decl).map_or(&[][..], Vec::as_slice)
    }

    /// Walks from `scope` outwards and returns the first declaration of `name`.
    pub fn lookup(&self, scope: ScopeID, name: AtomId) -> Option<(ScopeID, Declaration)> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id);
            if let Some(decl) = scope.get(name) {
                return Some((id, decl));
            }
            current = scope.parent;
        }
        None
    }
}
