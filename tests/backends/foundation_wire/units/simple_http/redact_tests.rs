use foundation_wire::simple_http::{
    render_redacted, render_request_redacted, RedactionPolicy, RenderConfig, RequestBody,
    SimpleMethod, SimpleRequest,
};

fn authorized_request() -> SimpleRequest {
    SimpleRequest::builder()
        .with_method(SimpleMethod::POST)
        .with_path("/login")
        .with_query("next=%2Fhome")
        .with_basic_auth("user", "pass")
        .with_basic_proxy_auth("proxy", "secret")
        .add_header("Cookie", "session=abc123")
        .add_header("X-Request-Id", "42")
        .with_body(RequestBody::bytes("user=alice&password=hunter2"))
        .build()
}

/// WHY: Credential headers must never show up in diagnostics
/// WHAT: Authorization and Proxy-Authorization values are replaced
#[test]
fn test_default_policy_masks_auth_headers() {
    let request = authorized_request();
    let authorization = request.headers.get("Authorization").unwrap().to_string();
    let proxy = request.headers.get("Proxy-Authorization").unwrap().to_string();

    let rendered = render_redacted(&request.descriptor(), &RedactionPolicy::default());

    assert!(!rendered.contains(&authorization));
    assert!(!rendered.contains("dXNlcjpwYXNz"));
    assert!(!rendered.contains(&proxy));
    assert!(rendered.contains("Authorization: <REDACTED>"));
    assert!(rendered.contains("Proxy-Authorization: <REDACTED>"));
    assert!(rendered.contains("X-Request-Id: 42"));
    assert!(rendered.contains("Cookie: session=abc123"));
    assert!(rendered.contains("method  = POST"));
    assert!(rendered.contains("uri     = http://localhost/login?next=%2Fhome"));
}

/// WHY: The masked set and the marker are configuration, but credential
/// headers stay masked whatever the configuration lists
/// WHAT: A TOML policy naming only Cookie still masks both auth headers
#[test]
fn test_policy_from_config() {
    let config = RenderConfig::from_toml_str(
        r#"
        [redaction]
        headers = ["cookie"]
        marker = "[hidden]"
        "#,
    )
    .unwrap();

    let request = authorized_request();
    let proxy = request.headers.get("Proxy-Authorization").unwrap().to_string();
    let rendered = render_redacted(&request.descriptor(), &config.redaction);

    assert!(rendered.contains("Cookie: [hidden]"));
    assert!(rendered.contains("Authorization: [hidden]"));
    assert!(rendered.contains("Proxy-Authorization: [hidden]"));
    assert!(!rendered.contains("abc123"));
    assert!(!rendered.contains("dXNlcjpwYXNz"));
    assert!(!rendered.contains(&proxy));
}

/// WHY: An empty masked set must not switch credential masking off
/// WHAT: Basic auth stays hidden under `headers = []`
#[test]
fn test_empty_header_list_keeps_auth_masked() {
    let config = RenderConfig::from_toml_str("[redaction]\nheaders = []\n").unwrap();
    let request = SimpleRequest::builder().with_basic_auth("user", "pass").build();
    let rendered = render_redacted(&request.descriptor(), &config.redaction);
    assert!(!rendered.contains("dXNlcjpwYXNz"));
    assert!(rendered.contains("Authorization: <REDACTED>"));
}

/// WHY: Bodies may hold secrets too
/// WHAT: Only the body shape is rendered
#[test]
fn test_request_rendering_never_shows_body() {
    let rendered = render_request_redacted(&authorized_request(), &RedactionPolicy::default());
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("body    = FixedBytes(27 bytes)"));
}

/// WHY: Stray debug formatting is a common leak
/// WHAT: Debug and Display of requests mask credentials by default
#[test]
fn test_debug_and_display_mask_by_default() {
    let request = authorized_request();
    let debug = format!("{request:?}");
    assert!(!debug.contains("dXNlcjpwYXNz"));
    assert!(!debug.contains("hunter2"));

    let display = request.descriptor().to_string();
    assert!(!display.contains("dXNlcjpwYXNz"));
    assert!(display.starts_with("Request {\n"));
}

/// WHY: Rendering is total
/// WHAT: A request with no headers and odd values still renders
#[test]
fn test_rendering_minimal_request() {
    let request = SimpleRequest::builder()
        .with_method(SimpleMethod::Custom("PROPFIND".into()))
        .build();
    let rendered = render_redacted(&request.descriptor(), &RedactionPolicy::default());
    assert!(rendered.contains("method  = PROPFIND"));
    assert!(rendered.contains("headers =\n}"));
}
