#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum RawRedeclaration {
    #[default]
    #[serde(rename = "first-wins", alias = "firstWins")]
    FirstWins,
    #[serde(rename = "report")]
    Report,
}

/// What the scope resolver does when a name is declared twice in one scope.
/// The first declaration is kept either way.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum RedeclarationPolicy {
    #[default]
    FirstWins,
    Report,
}

impl From<RawRedeclaration> for RedeclarationPolicy {
    fn from(val: RawRedeclaration) -> Self {
        match val {
            RawRedeclaration::FirstWins => RedeclarationPolicy::FirstWins,
            RawRedeclaration::Report => RedeclarationPolicy::Report,
        }
    }
}

pub const DEFAULT_TEMP_PREFIX: &str = "__qp";
pub const DEFAULT_ACTIVATION_IDENT: &str = "__qp_activation";
pub const DEFAULT_ACTIVATION_STACK_IDENT: &str = "__qp_function";
pub const DEFAULT_RUNTIME_IDENT: &str = "window";
pub const DEFAULT_HOST_IDENT: &str = "__qp";
pub const DEFAULT_TURN_PROPERTY: &str = "turn";

/// Names a browser page exposes before any user script runs.
pub const DEFAULT_GLOBALS: &[&str] = &[
    // ecmascript
    "undefined",
    "NaN",
    "Infinity",
    "globalThis",
    "eval",
    "isNaN",
    "isFinite",
    "parseInt",
    "parseFloat",
    "encodeURI",
    "encodeURIComponent",
    "decodeURI",
    "decodeURIComponent",
    "escape",
    "unescape",
    "Object",
    "Function",
    "Array",
    "String",
    "Number",
    "Boolean",
    "Symbol",
    "Date",
    "RegExp",
    "Error",
    "EvalError",
    "RangeError",
    "ReferenceError",
    "SyntaxError",
    "TypeError",
    "URIError",
    "Math",
    "JSON",
    "Promise",
    "Map",
    "Set",
    "WeakMap",
    "WeakSet",
    "Proxy",
    "Reflect",
    // host
    "window",
    "self",
    "document",
    "console",
    "navigator",
    "location",
    "history",
    "localStorage",
    "sessionStorage",
    "alert",
    "setTimeout",
    "clearTimeout",
    "setInterval",
    "clearInterval",
    "requestAnimationFrame",
    "XMLHttpRequest",
];
