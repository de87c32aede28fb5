use qp_errors::DiagnosticExt;
use qp_errors::miette;
use qp_errors::miette::Diagnostic;
use qp_errors::thiserror;
use qp_errors::thiserror::Error;
use qp_span::Span;

#[derive(Error, Diagnostic, DiagnosticExt, Debug)]
#[error("'{name}' is already declared in this scope.")]
#[diagnostic(severity(Warning))]
pub struct Redeclaration {
    #[label(primary)]
    pub span: Span,
    pub name: String,
    #[label("Earlier declaration here")]
    pub original_span: Span,
}
