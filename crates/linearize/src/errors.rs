use qp_errors::DiagnosticExt;
use qp_errors::miette;
use qp_errors::miette::Diagnostic;
use qp_errors::thiserror;
use qp_errors::thiserror::Error;
use qp_span::Span;

#[derive(Error, Diagnostic, DiagnosticExt, Debug)]
pub enum LinearizeError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    PendingInsertions(PendingInsertions),
    #[error(transparent)]
    #[diagnostic(transparent)]
    JumpOutsideTarget(JumpOutsideTarget),
}

#[derive(Error, Diagnostic, DiagnosticExt, Debug)]
#[error("{count} hoisted temporaries were never attached to a statement.")]
pub struct PendingInsertions {
    #[label(primary)]
    pub span: Span,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JumpKind {
    Break,
    Continue,
}

impl std::fmt::Display for JumpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JumpKind::Break => write!(f, "break"),
            JumpKind::Continue => write!(f, "continue"),
        }
    }
}

#[derive(Error, Diagnostic, DiagnosticExt, Debug)]
#[error("Unlabeled '{kind}' has no enclosing statement to jump to.")]
pub struct JumpOutsideTarget {
    #[label(primary)]
    pub span: Span,
    pub kind: JumpKind,
}

impl From<PendingInsertions> for LinearizeError {
    fn from(value: PendingInsertions) -> Self {
        LinearizeError::PendingInsertions(value)
    }
}

impl From<JumpOutsideTarget> for LinearizeError {
    fn from(value: JumpOutsideTarget) -> Self {
        LinearizeError::JumpOutsideTarget(value)
    }
}
