use std::sync::Arc;

use qp_span::{ModuleArena, ModuleID};

#[derive(Debug)]
pub(crate) enum ModuleSource {
    Named(miette::NamedSource<Arc<String>>),
    Anonymous(Arc<String>),
}

impl ModuleSource {
    /// `None` for modules without text, such as the transient one.
    pub(crate) fn of(module_arena: &ModuleArena, module: ModuleID) -> Option<Self> {
        let text = module_arena.get_content(module)?.clone();
        let Some(path) = module_arena.get_path(module) else {
            return Some(ModuleSource::Anonymous(text));
        };
        let name = std::env::current_dir()
            .ok()
            .and_then(|cwd| relative_path::PathExt::relative_to(path.as_path(), cwd).ok())
            .map_or_else(|| path.display().to_string(), |relative| relative.to_string());
        Some(ModuleSource::Named(miette::NamedSource::new(name, text)))
    }

    pub(crate) fn as_source_code(&self) -> &dyn miette::SourceCode {
        match self {
            ModuleSource::Named(named) => named,
            ModuleSource::Anonymous(text) => text,
        }
    }
}
