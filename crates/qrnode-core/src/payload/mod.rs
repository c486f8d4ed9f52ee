//! Payload construction: the text a QR code encodes.
//!
//! - `template` -- free-text templates with `{{name}}` placeholders
//! - `uri` -- URIs with literal or shared-state query values
//!
//! `PayloadSource` picks one of the two from the node configuration.

pub mod template;
pub mod uri;

use std::collections::HashMap;

use qrnode_types::config::{OperationMode, QrCodeConfig};
use qrnode_types::error::NodeError;
use qrnode_types::tree::SharedState;

use self::template::Template;
use self::uri::UriTemplate;

/// Read-only access to the values a payload refers to.
pub trait StateLookup {
    /// Text form of the value stored under `key`.
    ///
    /// Fails with `NodeError::UndefinedReference` when the key is absent.
    fn lookup(&self, key: &str) -> Result<String, NodeError>;
}

impl StateLookup for SharedState {
    fn lookup(&self, key: &str) -> Result<String, NodeError> {
        self.get_string(key)
    }
}

impl StateLookup for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Result<String, NodeError> {
        self.get(key)
            .cloned()
            .ok_or_else(|| NodeError::UndefinedReference(key.to_string()))
    }
}

/// The payload strategy of a node, compiled once from its configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadSource {
    FreeText(Template),
    Uri(UriTemplate),
}

impl PayloadSource {
    pub fn from_config(config: &QrCodeConfig) -> Self {
        match config.operation_mode {
            OperationMode::FreeText => PayloadSource::FreeText(Template::parse(&config.free_text)),
            OperationMode::Uri => PayloadSource::Uri(UriTemplate::from_config(config)),
        }
    }

    pub fn mode(&self) -> OperationMode {
        match self {
            PayloadSource::FreeText(_) => OperationMode::FreeText,
            PayloadSource::Uri(_) => OperationMode::Uri,
        }
    }

    /// Shared-state keys the payload reads, in order, repeats included.
    pub fn references(&self) -> Vec<&str> {
        match self {
            PayloadSource::FreeText(template) => template.placeholders().collect(),
            PayloadSource::Uri(uri) => uri.references().collect(),
        }
    }

    pub fn build(&self, lookup: &dyn StateLookup) -> Result<String, NodeError> {
        match self {
            PayloadSource::FreeText(template) => template.render(lookup),
            PayloadSource::Uri(uri) => uri.render(lookup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrnode_types::config::QueryParam;
    use serde_json::json;

    #[test]
    fn test_shared_state_lookup() {
        let mut state = SharedState::new();
        state.insert("otp", json!(123456));

        assert_eq!(state.lookup("otp").unwrap(), "123456");
        assert_eq!(
            state.lookup("nope"),
            Err(NodeError::UndefinedReference("nope".to_string()))
        );
    }

    #[test]
    fn test_source_follows_operation_mode() {
        let config = QrCodeConfig {
            free_text: "{{a}}".to_string(),
            ..Default::default()
        };
        let source = PayloadSource::from_config(&config);
        assert_eq!(source.mode(), OperationMode::FreeText);
        assert_eq!(source.references(), vec!["a"]);

        let config = QrCodeConfig {
            operation_mode: OperationMode::Uri,
            free_text: "{{ignored}}".to_string(),
            uri_query_params: vec![QueryParam::new("k", "&b")],
            ..Default::default()
        };
        let source = PayloadSource::from_config(&config);
        assert_eq!(source.mode(), OperationMode::Uri);
        assert_eq!(source.references(), vec!["b"]);
    }

    #[test]
    fn test_build_free_text_from_shared_state() {
        let config = QrCodeConfig {
            free_text: "user={{username}}".to_string(),
            ..Default::default()
        };
        let mut state = SharedState::new();
        state.insert("username", "demo");

        let payload = PayloadSource::from_config(&config).build(&state).unwrap();
        assert_eq!(payload, "user=demo");
    }
}
