mod normalized;
mod options;
mod raw;

pub use normalized::{NormalizedTraceConfig, TraceFlags};
pub use options::{
    DEFAULT_ACTIVATION_IDENT, DEFAULT_ACTIVATION_STACK_IDENT, DEFAULT_GLOBALS, DEFAULT_HOST_IDENT,
    DEFAULT_RUNTIME_IDENT, DEFAULT_TEMP_PREFIX, DEFAULT_TURN_PROPERTY,
};
pub use options::{RawRedeclaration, RedeclarationPolicy};
pub use raw::RawTraceConfig;
