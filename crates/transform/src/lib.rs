//! Runs the linearizer and then the scope resolver over one program.

use qp_ast::{self as ast, NodeFactory};
use qp_atom::AtomMap;
use qp_config::NormalizedTraceConfig;
use qp_errors::DiagnosticExt;
use qp_errors::miette;
use qp_errors::miette::Diagnostic;
use qp_errors::thiserror;
use qp_errors::thiserror::Error;
use qp_linearize::{LinearizeError, TraceTable};
use qp_scope::ScopeTree;

pub use qp_config::RawTraceConfig;

#[derive(Error, Diagnostic, DiagnosticExt, Debug)]
pub enum TransformError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Linearize(LinearizeError),
}

impl From<LinearizeError> for TransformError {
    fn from(value: LinearizeError) -> Self {
        TransformError::Linearize(value)
    }
}

pub struct TransformOutput<'cx> {
    pub program: &'cx ast::Program<'cx>,
    pub traces: TraceTable,
    pub scopes: ScopeTree,
}

impl TransformOutput<'_> {
    /// Diagnostics collected along the way. None of them stopped the run.
    pub fn diags(&self) -> &[qp_errors::Diag] {
        &self.scopes.diags
    }
}

pub fn transform<'cx>(
    program: &'cx ast::Program<'cx>,
    factory: &mut NodeFactory<'cx>,
    atoms: &mut AtomMap<'cx>,
    config: &NormalizedTraceConfig,
) -> Result<TransformOutput<'cx>, TransformError> {
    qp_tracing::init_tracing();
    let _span = tracing::debug_span!("transform").entered();
    let linearized = qp_linearize::linearize(program, factory, atoms, config)?;
    let scopes = qp_scope::resolve_scopes(linearized.program, atoms, config);
    tracing::debug!(
        hoisted = linearized.traces.len(),
        scopes = scopes.len(),
        "transform finished"
    );
    Ok(TransformOutput {
        program: linearized.program,
        traces: linearized.traces,
        scopes,
    })
}
