use crate::options::RedeclarationPolicy;

macro_rules! normalized_option {
    ($s: ident, $(($option: ident, $ty: ty)),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub struct $s {
            $(pub(super) $option: $ty,)*
        }
        impl $s {
            $(pub fn $option(&self) -> & $ty {
                &self.$option
            })*
        }
    };
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TraceFlags: u8 {
        /// Pre-declare `var`s and function declarations before walking a scope.
        const HOIST_DECLARATIONS       = 1 << 0;
        /// Never hoist out of the right side of `&&`/`||` or the arms of `?:`.
        const PRESERVE_SHORT_CIRCUIT   = 1 << 1;
        const EMIT_ACTIVATION          = 1 << 2;
    }
}

normalized_option!(
    NormalizedTraceConfig,
    (temp_prefix, String),
    (activation_ident, String),
    (activation_stack_ident, String),
    (runtime_ident, String),
    (host_ident, String),
    (turn_property, String),
    (globals, Vec<String>),
    (redeclaration, RedeclarationPolicy),
    (flags, TraceFlags),
);

impl Default for NormalizedTraceConfig {
    fn default() -> Self {
        crate::RawTraceConfig::default().normalize()
    }
}

impl NormalizedTraceConfig {
    #[inline(always)]
    pub const fn hoist_declarations(&self) -> bool {
        self.flags.contains(TraceFlags::HOIST_DECLARATIONS)
    }

    #[inline(always)]
    pub const fn preserve_short_circuit(&self) -> bool {
        self.flags.contains(TraceFlags::PRESERVE_SHORT_CIRCUIT)
    }

    #[inline(always)]
    pub const fn emit_activation(&self) -> bool {
        self.flags.contains(TraceFlags::EMIT_ACTIVATION)
    }
}
