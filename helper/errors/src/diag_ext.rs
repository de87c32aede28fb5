use qp_span::ModuleArena;
pub use qp_span::ModuleID;

use super::source_code::ModuleSource;

/// A `miette` diagnostic that knows which module its primary span lives in.
pub trait DiagnosticExt: miette::Diagnostic {
    fn module_id(&self) -> ModuleID;
}

type BoxedDiag = Box<dyn DiagnosticExt + Send + Sync + 'static>;

#[derive(Debug)]
struct WithSource {
    source: Option<ModuleSource>,
    inner: BoxedDiag,
}

impl std::error::Error for WithSource {}

impl std::fmt::Display for WithSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.inner, f)
    }
}

impl miette::Diagnostic for WithSource {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.inner.code()
    }

    fn severity(&self) -> Option<miette::Severity> {
        self.inner.severity()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.inner.help()
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.source.as_ref().map(ModuleSource::as_source_code)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        // synthetic nodes have no text to underline
        self.source.as_ref()?;
        self.inner.labels()
    }
}

/// Pairs `diag` with the text of the module its primary span points into.
pub fn attach_source(diag: BoxedDiag, module_arena: &ModuleArena) -> Box<dyn miette::Diagnostic + Send + Sync + 'static> {
    let source = ModuleSource::of(module_arena, diag.module_id());
    Box::new(WithSource { source, inner: diag })
}
