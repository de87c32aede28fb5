//! Builds the lexical scope tree of a program and binds every identifier
//! reference to the identifier that declared it.
//!
//! Scopes are function-like: the program, functions, arrows, accessors and
//! catch clauses. `var` declares into the innermost of them.

mod errors;
mod hoist;
mod pprint;
mod resolver;
mod scope;

use qp_ast::{self as ast, Visitor};
use qp_atom::AtomMap;
use qp_config::NormalizedTraceConfig;

pub use errors::Redeclaration;
pub use pprint::pprint_scopes;
pub use scope::{Declaration, Scope, ScopeID, ScopeKind, ScopeTree};

pub fn resolve_scopes<'cx>(
    program: &'cx ast::Program<'cx>,
    atoms: &mut AtomMap<'cx>,
    config: &NormalizedTraceConfig,
) -> ScopeTree {
    let _span = tracing::debug_span!("resolve_scopes", module = program.span.module.as_u32()).entered();
    let mut resolver = resolver::Resolver::new(atoms, config);
    resolver.visit_program(program);
    let tree = resolver.tree;
    tracing::debug!(
        scopes = tree.len(),
        bound = tree.resolved.len(),
        diags = tree.diags.len(),
        "scopes resolved"
    );
    tree
}
