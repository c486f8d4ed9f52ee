//! Node configuration types.
//!
//! `QrCodeSettings` is the raw form read from a host configuration file: every
//! attribute is optional. `QrCodeSettings::into_config` applies the defaults
//! and validation rules once, producing the immutable `QrCodeConfig` a node
//! instance holds for its whole lifetime.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Operation mode
// ---------------------------------------------------------------------------

/// How the node builds the text encoded in the QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationMode {
    /// Substitute `{{name}}` placeholders in a free-text template.
    FreeText,
    /// Assemble a URI from scheme, host, port, resource and query params.
    #[serde(rename = "URI")]
    Uri,
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationMode::FreeText => write!(f, "FreeText"),
            OperationMode::Uri => write!(f, "URI"),
        }
    }
}

impl FromStr for OperationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" => Err(ConfigError::MissingOperationMode),
            "freetext" | "free_text" => Ok(OperationMode::FreeText),
            "uri" => Ok(OperationMode::Uri),
            _ => Err(ConfigError::InvalidOperationMode(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// One entry of the ordered `uriQueryParams` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    pub name: String,
    /// Literal value, or `&key` to read `key` from shared state.
    pub value: String,
}

impl QueryParam {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Interpret the raw value.
    pub fn spec(&self) -> ValueSpec {
        ValueSpec::parse(&self.value)
    }
}

/// A parsed query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSpec {
    /// Used verbatim.
    Literal(String),
    /// Looked up in shared state under this key.
    Reference(String),
}

impl ValueSpec {
    /// A leading `&` marks a shared-state reference; anything else,
    /// including the empty string, is a literal.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix('&') {
            Some(key) => ValueSpec::Reference(key.to_string()),
            None => ValueSpec::Literal(raw.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Settings (raw) and config (validated)
// ---------------------------------------------------------------------------

/// Raw node settings as they appear in a configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri_scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri_host: Option<String>,
    /// Written as a string or a bare number (`uriPort = 443`).
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub uri_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri_resource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri_query_params: Option<Vec<QueryParam>>,
}

/// Accept either a string or an unsigned integer, kept as text.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(n) => n.to_string(),
    }))
}

impl QrCodeSettings {
    /// Apply defaults and validate, producing an immutable `QrCodeConfig`.
    ///
    /// Defaults: `FreeText` mode, empty strings, no query params.
    /// Rejects an unparseable or blank operation mode, empty or duplicate
    /// query parameter names, and `&` references with no key.
    pub fn into_config(self) -> Result<QrCodeConfig, ConfigError> {
        let operation_mode = match self.operation_mode {
            Some(raw) => raw.parse()?,
            None => OperationMode::FreeText,
        };

        let uri_query_params = self.uri_query_params.unwrap_or_default();
        let mut seen = HashSet::new();
        for param in &uri_query_params {
            if param.name.is_empty() {
                return Err(ConfigError::EmptyQueryParamName);
            }
            if !seen.insert(param.name.as_str()) {
                return Err(ConfigError::DuplicateQueryParam(param.name.clone()));
            }
            if param.spec() == ValueSpec::Reference(String::new()) {
                return Err(ConfigError::EmptyReference(param.name.clone()));
            }
        }

        Ok(QrCodeConfig {
            operation_mode,
            free_text: self.free_text.unwrap_or_default(),
            uri_scheme: self.uri_scheme.unwrap_or_default(),
            uri_host: self.uri_host.unwrap_or_default(),
            uri_port: self.uri_port.unwrap_or_default(),
            uri_resource: self.uri_resource.unwrap_or_default(),
            uri_query_params,
        })
    }
}

/// Validated, read-only configuration of one QR code node instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeConfig {
    pub operation_mode: OperationMode,
    pub free_text: String,
    pub uri_scheme: String,
    pub uri_host: String,
    pub uri_port: String,
    pub uri_resource: String,
    pub uri_query_params: Vec<QueryParam>,
}

impl Default for QrCodeConfig {
    fn default() -> Self {
        Self {
            operation_mode: OperationMode::FreeText,
            free_text: String::new(),
            uri_scheme: String::new(),
            uri_host: String::new(),
            uri_port: String::new(),
            uri_resource: String::new(),
            uri_query_params: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Attribute schema
// ---------------------------------------------------------------------------

/// What kind of input the host should present for an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "choices", rename_all = "snake_case")]
pub enum AttributeKind {
    Choice(&'static [&'static str]),
    Text,
    OrderedMap,
}

/// Declared configuration attribute, as exposed to the host's admin UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttributeSchema {
    pub name: &'static str,
    /// Presentation order; lower comes first.
    pub order: u32,
    pub required: bool,
    pub kind: AttributeKind,
}

/// Configuration schema of the QR code node, in presentation order.
pub const QR_CODE_ATTRIBUTES: [AttributeSchema; 7] = [
    AttributeSchema {
        name: "operationMode",
        order: 100,
        required: true,
        kind: AttributeKind::Choice(&["FreeText", "URI"]),
    },
    AttributeSchema {
        name: "freeText",
        order: 200,
        required: false,
        kind: AttributeKind::Text,
    },
    AttributeSchema {
        name: "uriScheme",
        order: 300,
        required: false,
        kind: AttributeKind::Text,
    },
    AttributeSchema {
        name: "uriHost",
        order: 400,
        required: false,
        kind: AttributeKind::Text,
    },
    AttributeSchema {
        name: "uriPort",
        order: 500,
        required: false,
        kind: AttributeKind::Text,
    },
    AttributeSchema {
        name: "uriResource",
        order: 600,
        required: false,
        kind: AttributeKind::Text,
    },
    AttributeSchema {
        name: "uriQueryParams",
        order: 700,
        required: false,
        kind: AttributeKind::OrderedMap,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_mode_from_str() {
        assert_eq!("FreeText".parse::<OperationMode>(), Ok(OperationMode::FreeText));
        assert_eq!("free_text".parse::<OperationMode>(), Ok(OperationMode::FreeText));
        assert_eq!("URI".parse::<OperationMode>(), Ok(OperationMode::Uri));
        assert_eq!("uri".parse::<OperationMode>(), Ok(OperationMode::Uri));
        assert_eq!(
            "".parse::<OperationMode>(),
            Err(ConfigError::MissingOperationMode)
        );
        assert_eq!(
            "barcode".parse::<OperationMode>(),
            Err(ConfigError::InvalidOperationMode("barcode".to_string()))
        );
    }

    #[test]
    fn test_operation_mode_display_uses_host_names() {
        assert_eq!(OperationMode::FreeText.to_string(), "FreeText");
        assert_eq!(OperationMode::Uri.to_string(), "URI");
        assert_eq!(serde_json::to_string(&OperationMode::Uri).unwrap(), "\"URI\"");
    }

    #[test]
    fn test_value_spec_parse() {
        assert_eq!(
            ValueSpec::parse("&userId"),
            ValueSpec::Reference("userId".to_string())
        );
        assert_eq!(ValueSpec::parse("1"), ValueSpec::Literal("1".to_string()));
        assert_eq!(ValueSpec::parse("a&b"), ValueSpec::Literal("a&b".to_string()));
        assert_eq!(ValueSpec::parse(""), ValueSpec::Literal(String::new()));
    }

    #[test]
    fn test_empty_settings_apply_defaults() {
        let config = QrCodeSettings::default().into_config().unwrap();
        assert_eq!(config, QrCodeConfig::default());
        assert_eq!(config.operation_mode, OperationMode::FreeText);
        assert!(config.free_text.is_empty());
        assert!(config.uri_query_params.is_empty());
    }

    #[test]
    fn test_settings_deserialize_from_toml() {
        let toml_str = r#"
operationMode = "URI"
uriScheme = "https"
uriHost = "example.com"
uriPort = "443"
uriResource = "verify"

[[uriQueryParams]]
name = "u"
value = "&userId"

[[uriQueryParams]]
name = "v"
value = "1"
"#;
        let settings: QrCodeSettings = toml::from_str(toml_str).unwrap();
        let config = settings.into_config().unwrap();
        assert_eq!(config.operation_mode, OperationMode::Uri);
        assert_eq!(config.uri_host, "example.com");
        assert_eq!(
            config.uri_query_params,
            vec![QueryParam::new("u", "&userId"), QueryParam::new("v", "1")]
        );
    }

    #[test]
    fn test_settings_accept_numeric_port() {
        let settings: QrCodeSettings = toml::from_str("uriPort = 443").unwrap();
        assert_eq!(settings.uri_port.as_deref(), Some("443"));

        let settings: QrCodeSettings = toml::from_str(r#"uriPort = "8443""#).unwrap();
        assert_eq!(settings.uri_port.as_deref(), Some("8443"));

        let settings: QrCodeSettings = serde_json::from_str(r#"{ "uriPort": 80 }"#).unwrap();
        assert_eq!(settings.into_config().unwrap().uri_port, "80");

        let settings: QrCodeSettings = toml::from_str("").unwrap();
        assert_eq!(settings.uri_port, None);

        assert!(toml::from_str::<QrCodeSettings>("uriPort = true").is_err());
    }

    #[test]
    fn test_settings_reject_invalid_mode() {
        let settings = QrCodeSettings {
            operation_mode: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            settings.into_config(),
            Err(ConfigError::MissingOperationMode)
        );
    }

    #[test]
    fn test_settings_reject_duplicate_param() {
        let settings = QrCodeSettings {
            uri_query_params: Some(vec![
                QueryParam::new("u", "1"),
                QueryParam::new("u", "2"),
            ]),
            ..Default::default()
        };
        assert_eq!(
            settings.into_config(),
            Err(ConfigError::DuplicateQueryParam("u".to_string()))
        );
    }

    #[test]
    fn test_settings_reject_empty_param_name_and_reference() {
        let settings = QrCodeSettings {
            uri_query_params: Some(vec![QueryParam::new("", "1")]),
            ..Default::default()
        };
        assert_eq!(settings.into_config(), Err(ConfigError::EmptyQueryParamName));

        let settings = QrCodeSettings {
            uri_query_params: Some(vec![QueryParam::new("u", "&")]),
            ..Default::default()
        };
        assert_eq!(
            settings.into_config(),
            Err(ConfigError::EmptyReference("u".to_string()))
        );
    }

    #[test]
    fn test_attribute_schema_order() {
        let orders: Vec<u32> = QR_CODE_ATTRIBUTES.iter().map(|a| a.order).collect();
        assert_eq!(orders, vec![100, 200, 300, 400, 500, 600, 700]);

        let required: Vec<&str> = QR_CODE_ATTRIBUTES
            .iter()
            .filter(|a| a.required)
            .map(|a| a.name)
            .collect();
        assert_eq!(required, vec!["operationMode"]);
    }

    #[test]
    fn test_config_serializes_camel_case() {
        let config = QrCodeConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["operationMode"], "FreeText");
        assert_eq!(json["uriQueryParams"], serde_json::json!([]));
    }
}
