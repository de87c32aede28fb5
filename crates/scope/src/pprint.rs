use qp_atom::AtomMap;

use super::{Declaration, ScopeID, ScopeTree};

/// One line per scope, nested by indentation. Implicit declarations carry a
/// trailing `*`.
pub fn pprint_scopes(tree: &ScopeTree, atoms: &AtomMap<'_>) -> String {
    let mut out = String::with_capacity(128);
    if !tree.is_empty() {
        print_scope(tree, atoms, tree.root(), 0, &mut out);
    }
    out
}

fn print_scope(tree: &ScopeTree, atoms: &AtomMap<'_>, id: ScopeID, depth: usize, out: &mut String) {
    let scope = tree.scope(id);
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(&format!("{:?}:", scope.kind));
    for (name, decl) in scope.declarations() {
        out.push(' ');
        out.push_str(atoms.get(name));
        if decl == Declaration::Implicit {
            out.push('*');
        }
    }
    out.push('\n');
    for &child in &scope.children {
        print_scope(tree, atoms, child, depth + 1, out);
    }
}
