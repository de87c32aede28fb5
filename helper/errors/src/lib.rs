pub mod diag_ext;
mod source_code;

use diag_ext::attach_source;
pub use miette;
pub use qp_diag_derive::DiagnosticExt;
use qp_span::ModuleArena;
pub use thiserror;

#[derive(Debug)]
pub struct Diag {
    pub inner: Box<dyn diag_ext::DiagnosticExt + Send + Sync + 'static>,
}

impl Diag {
    pub fn new(inner: impl diag_ext::DiagnosticExt + Send + Sync + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    pub fn severity(&self) -> miette::Severity {
        self.inner.severity().unwrap_or(miette::Severity::Error)
    }

    pub fn emit_message(self, module_arena: &ModuleArena, no_color: bool) -> String {
        let mut out = String::new();
        let error = attach_source(self.inner, module_arena);
        let error_report = miette::ErrReport::new_boxed(error);
        let theme = if no_color {
            miette::GraphicalTheme::unicode_nocolor()
        } else {
            miette::GraphicalTheme::unicode()
        };
        if let Err(err) = miette::GraphicalReportHandler::new_themed(theme)
            .with_width(80)
            .with_context_lines(0)
            .render_report(&mut out, error_report.as_ref())
        {
            // fall back to the bare message
            out = format!("{error_report}: {err}");
        }
        out.trim_start_matches('\n').to_string()
    }

    pub fn emit(self, module_arena: &ModuleArena) {
        let no_color = match std::env::var("NO_COLOR") {
            Ok(string) => string != "0",
            _ => false,
        };
        let out = self.emit_message(module_arena, no_color);
        eprintln!("{out}");
    }
}
