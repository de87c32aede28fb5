use std::sync::Arc;

qp_utils::index!(ModuleID);

impl ModuleID {
    /// Owner of every node the passes synthesize.
    pub const TRANSIENT: ModuleID = ModuleID(u32::MAX);
    pub const DEFAULT: ModuleID = ModuleID(u32::MAX - 1);
}

impl Default for ModuleID {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub lo: u32,
    pub hi: u32,
    pub module: ModuleID,
}

impl Span {
    pub fn new(lo: u32, hi: u32, module: ModuleID) -> Self {
        Self { lo, hi, module }
    }

    pub const fn transient() -> Self {
        Self {
            lo: 0,
            hi: 0,
            module: ModuleID::TRANSIENT,
        }
    }

    pub fn len(&self) -> u32 {
        self.hi - self.lo
    }

    pub fn is_empty(&self) -> bool {
        self.lo == self.hi
    }

    /// `true` when the span does not point into real source text.
    pub fn is_synthetic(&self) -> bool {
        self.module == ModuleID::TRANSIENT || self.is_empty()
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(value: Span) -> Self {
        let len = value.hi - value.lo;
        (value.lo as usize, len as usize).into()
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.module.as_u32(), self.lo, self.hi)
    }
}

pub type ModulePath = std::path::PathBuf;

/// Source text of every module handed to the passes, kept around so that
/// diagnostics can point into it.
#[derive(Debug, Default)]
pub struct ModuleArena {
    path_map: Vec<Option<ModulePath>>,
    content_map: Vec<Arc<String>>,
}

impl ModuleArena {
    pub fn new(cap: usize) -> Self {
        Self {
            path_map: Vec::with_capacity(cap),
            content_map: Vec::with_capacity(cap),
        }
    }

    pub fn new_module_with_content(&mut self, p: Option<ModulePath>, content: String) -> ModuleID {
        let id = ModuleID(self.content_map.len() as u32);
        assert!(id != ModuleID::DEFAULT && id != ModuleID::TRANSIENT);
        self.content_map.push(Arc::new(content));
        assert_eq!(id.as_usize(), self.path_map.len());
        self.path_map.push(p);
        id
    }

    pub fn get_path(&self, id: ModuleID) -> Option<&ModulePath> {
        self.path_map.get(id.as_usize()).and_then(|p| p.as_ref())
    }

    pub fn get_content(&self, id: ModuleID) -> Option<&Arc<String>> {
        self.content_map.get(id.as_usize())
    }

    pub fn len(&self) -> usize {
        self.content_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content_map.is_empty()
    }
}
