/// Declares an id that counts up from zero within one module and remembers
/// that module. `#n` when displayed. Callers must depend on `qp_span`.
#[macro_export]
macro_rules! module_index {
    ($name: ident) => {
        #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
        pub struct $name {
            module: qp_span::ModuleID,
            index: u32,
        }
        impl $name {
            pub const fn new(module: qp_span::ModuleID, index: u32) -> $name {
                $name { module, index }
            }
            pub const fn root(module: qp_span::ModuleID) -> $name {
                $name::new(module, 0)
            }
            pub const fn next(&self) -> $name {
                $name::new(self.module, self.index + 1)
            }
            pub const fn index_as_u32(&self) -> u32 {
                self.index
            }
            pub const fn module(&self) -> qp_span::ModuleID {
                self.module
            }
        }
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "#{}", self.index)
            }
        }
    };
}

/// Declares a plain `u32` id usable as a `nohash` key.
#[macro_export]
macro_rules! index {
    ($name: ident) => {
        #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
        pub struct $name(u32);
        impl $name {
            pub const fn root() -> $name {
                $name(0)
            }
            pub const fn next(&self) -> $name {
                $name(self.0 + 1)
            }
            pub const fn from_usize(idx: usize) -> $name {
                $name(idx as u32)
            }
            pub const fn as_u32(&self) -> u32 {
                self.0
            }
            pub const fn as_usize(&self) -> usize {
                self.0 as usize
            }
        }
        impl $crate::nohash_hasher::IsEnabled for $name {}
    };
}
