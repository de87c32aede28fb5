use qp_config::{NormalizedTraceConfig, RawRedeclaration, RawTraceConfig, RedeclarationPolicy};

fn normalize(input: &str) -> NormalizedTraceConfig {
    let raw: RawTraceConfig = serde_json::from_str(input).unwrap();
    raw.normalize()
}

#[test]
fn test_defaults() {
    let c = normalize("{}");
    assert_eq!(c.temp_prefix(), "__qp");
    assert_eq!(c.activation_ident(), "__qp_activation");
    assert_eq!(c.activation_stack_ident(), "__qp_function");
    assert_eq!(c.runtime_ident(), "window");
    assert_eq!(c.host_ident(), "__qp");
    assert_eq!(c.turn_property(), "turn");
    assert_eq!(c.redeclaration(), &RedeclarationPolicy::FirstWins);
    assert!(!c.hoist_declarations());
    assert!(c.preserve_short_circuit());
    assert!(c.emit_activation());
    assert!(c.globals().iter().any(|g| g == "console"));
    assert!(c.globals().iter().any(|g| g == "__qp_function"));
}

#[test]
fn explicit_globals_replace_defaults() {
    let c = normalize(
        r#"
{
  "globals": ["foo", "bar", "foo"],
  "extraGlobals": ["baz"]
}"#,
    );
    assert_eq!(c.globals(), &["foo", "bar", "baz", "__qp_function"]);
}

#[test]
fn empty_identifiers_fall_back() {
    let c = normalize(
        r#"
{
  "tempPrefix": "",
  "activationStackIdent": "$stack"
}"#,
    );
    assert_eq!(c.temp_prefix(), "__qp");
    assert_eq!(c.activation_stack_ident(), "$stack");
    assert_eq!(c.globals().last().map(String::as_str), Some("$stack"));
}

#[test]
fn redeclaration_policy_should_parse() {
    let c = normalize(r#"{ "redeclaration": "report" }"#);
    assert_eq!(c.redeclaration(), &RedeclarationPolicy::Report);
    let c = normalize(r#"{ "redeclaration": "first-wins" }"#);
    assert_eq!(c.redeclaration(), &RedeclarationPolicy::FirstWins);
    assert!(serde_json::from_str::<RawTraceConfig>(r#"{ "redeclaration": "loud" }"#).is_err());
}

#[test]
fn flags_should_effect() {
    let c = normalize(
        r#"
{
  "hoistDeclarations": true,
  "preserveShortCircuit": false,
  "emitActivation": false
}"#,
    );
    assert!(c.hoist_declarations());
    assert!(!c.preserve_short_circuit());
    assert!(!c.emit_activation());
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(RawTraceConfig::from_json(r#"{ "tempPrefx": "x" }"#).is_err());
}

#[test]
fn builders_fill_missing_options() {
    let c = RawTraceConfig::default()
        .with_temp_prefix("$t".to_string())
        .with_temp_prefix_if_none("ignored".to_string())
        .with_redeclaration(RawRedeclaration::Report)
        .config_extra_globals(|mut g| {
            g.push("later".to_string());
            g
        })
        .normalize();
    assert_eq!(c.temp_prefix(), "$t");
    assert_eq!(c.redeclaration(), &RedeclarationPolicy::Report);
    assert!(c.globals().iter().any(|g| g == "later"));
}
