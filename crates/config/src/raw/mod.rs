use super::options::*;

macro_rules! with_option {
    ($s: ident, $(($option: ident, $ty: ty)),* $(,)?) => {
        #[derive(Debug, Default, Clone, serde::Deserialize, serde::Serialize)]
        #[serde(rename_all = "camelCase", deny_unknown_fields)]
        pub struct $s {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub(super) $option: Option<$ty>,
            )*
        }
        impl $s {
            paste::paste! {
                $(
                    pub fn [<with_ $option>](mut self, $option: $ty) -> Self {
                        self.$option = Some($option);
                        self
                    }
                    pub fn [<with_ $option _if_none>](mut self, $option: $ty) -> Self {
                        if self.$option.is_none() {
                            self.$option = Some($option);
                        }
                        self
                    }
                    pub fn [<config_ $option>](mut self, f: impl FnOnce($ty) -> $ty) -> Self {
                        self.$option = match self.$option {
                            Some(c) => Some(f(c)),
                            None => Some(f(Default::default())),
                        };
                        self
                    }
                )*
            }
        }
    };
}

with_option!(
    RawTraceConfig,
    (temp_prefix, String),
    (activation_ident, String),
    (activation_stack_ident, String),
    (runtime_ident, String),
    (host_ident, String),
    (turn_property, String),
    (globals, Vec<String>),
    (extra_globals, Vec<String>),
    (redeclaration, RawRedeclaration),
    (hoist_declarations, bool),
    (preserve_short_circuit, bool),
    (emit_activation, bool),
);

fn non_empty_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

impl RawTraceConfig {
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    pub fn normalize(self) -> super::NormalizedTraceConfig {
        use super::TraceFlags;

        let temp_prefix = non_empty_or(self.temp_prefix, DEFAULT_TEMP_PREFIX);
        let activation_ident = non_empty_or(self.activation_ident, DEFAULT_ACTIVATION_IDENT);
        let activation_stack_ident =
            non_empty_or(self.activation_stack_ident, DEFAULT_ACTIVATION_STACK_IDENT);
        let runtime_ident = non_empty_or(self.runtime_ident, DEFAULT_RUNTIME_IDENT);
        let host_ident = non_empty_or(self.host_ident, DEFAULT_HOST_IDENT);
        let turn_property = non_empty_or(self.turn_property, DEFAULT_TURN_PROPERTY);

        let mut globals = self
            .globals
            .unwrap_or_else(|| DEFAULT_GLOBALS.iter().map(|&s| s.to_string()).collect());
        globals.extend(self.extra_globals.unwrap_or_default());
        // the tracing runtime owns the activation stack
        globals.push(activation_stack_ident.clone());
        let mut seen = std::collections::HashSet::with_capacity(globals.len());
        globals.retain(|name| seen.insert(name.clone()));

        let redeclaration = self.redeclaration.unwrap_or_default().into();

        let mut flags = TraceFlags::empty();
        if self.hoist_declarations.unwrap_or(false) {
            flags |= TraceFlags::HOIST_DECLARATIONS;
        }
        if self.preserve_short_circuit.unwrap_or(true) {
            flags |= TraceFlags::PRESERVE_SHORT_CIRCUIT;
        }
        if self.emit_activation.unwrap_or(true) {
            flags |= TraceFlags::EMIT_ACTIVATION;
        }

        super::NormalizedTraceConfig {
            temp_prefix,
            activation_ident,
            activation_stack_ident,
            runtime_ident,
            host_ident,
            turn_property,
            globals,
            redeclaration,
            flags,
        }
    }
}
