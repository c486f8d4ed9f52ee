//! End-to-end runs of the QR code node across the render/resume round trip.

use qrnode_core::config::{ConfigFormat, parse_config};
use qrnode_core::node::{Node, QrCodeNode};
use qrnode_types::error::NodeError;
use qrnode_types::tree::{Action, Callback, SharedState, TreeContext};

fn shared_state() -> SharedState {
    let mut state = SharedState::new();
    state.insert("username", "bob");
    state.insert("realm", "alpha");
    state
}

#[test]
fn uri_node_renders_then_advances() {
    let config = parse_config(
        r#"
operationMode = "URI"
uriScheme = "https"
uriHost = "login.example.com"
uriPort = "8443"
uriResource = "enroll"

[[uriQueryParams]]
name = "user"
value = "&username"

[[uriQueryParams]]
name = "realm"
value = "&realm"

[[uriQueryParams]]
name = "v"
value = "2"
"#,
        ConfigFormat::Toml,
    )
    .unwrap();
    let node = QrCodeNode::new(config);

    // First invocation: nothing submitted yet, the node sends its script.
    let first = node.process(&TreeContext::new(shared_state())).unwrap();
    let Action::Send { callbacks } = first else {
        panic!("expected the node to send a callback");
    };
    assert_eq!(callbacks.len(), 1);
    let script = callbacks[0].message().unwrap();
    assert!(script.contains("https://login.example.com:8443/enroll?user=bob&realm=alpha&v=2"));

    // The user agent runs the script and posts the callback back with output.
    let resumed = TreeContext::new(shared_state()).with_callback(Callback::script("shown"));
    assert_eq!(node.process(&resumed).unwrap(), Action::goto_next());
}

#[test]
fn free_text_node_stays_until_output_is_non_empty() {
    let config = parse_config(
        r#"{ "operationMode": "FreeText", "freeText": "{{realm}}/{{username}}/{{username}}" }"#,
        ConfigFormat::Json,
    )
    .unwrap();
    let node = QrCodeNode::with_renderer(config, |text: &str| -> Result<Callback, NodeError> {
        Ok(Callback::script(text))
    });

    let blank = TreeContext::new(shared_state()).with_callback(Callback::script(""));
    assert_eq!(
        node.process(&blank).unwrap(),
        Action::send(Callback::script("alpha/bob/bob"))
    );

    let answered = TreeContext::new(shared_state()).with_callback(Callback::script("ok"));
    assert!(node.process(&answered).unwrap().is_advance());
}

#[test]
fn undefined_reference_fails_the_invocation() {
    let config = parse_config(
        "operationMode: URI\nuriQueryParams:\n  - name: t\n    value: \"&token\"\n",
        ConfigFormat::Yaml,
    )
    .unwrap();
    let node = QrCodeNode::new(config);

    let err = node.process(&TreeContext::new(shared_state())).unwrap_err();
    assert_eq!(err.to_string(), "undefined reference: token");
}
