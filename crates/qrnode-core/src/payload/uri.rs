//! URI payloads assembled from scheme, host, port, resource and query params.

use qrnode_types::config::{QrCodeConfig, ValueSpec};
use qrnode_types::error::NodeError;

use super::StateLookup;

/// A URI whose query values may come from shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    /// `scheme://host:port/resource`
    base: String,
    params: Vec<(String, ValueSpec)>,
}

impl UriTemplate {
    pub fn from_config(config: &QrCodeConfig) -> Self {
        let base = format!(
            "{}://{}:{}/{}",
            config.uri_scheme, config.uri_host, config.uri_port, config.uri_resource
        );
        let params = config
            .uri_query_params
            .iter()
            .map(|param| (param.name.clone(), param.spec()))
            .collect();
        Self { base, params }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Shared-state keys this URI reads, in parameter order.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.params.iter().filter_map(|(_, spec)| match spec {
            ValueSpec::Reference(key) => Some(key.as_str()),
            ValueSpec::Literal(_) => None,
        })
    }

    /// Build the URI.
    ///
    /// Parameters are emitted in configured order as `name=value` joined by
    /// `&`, after a `?` that is only present when there is at least one
    /// parameter. Names and values are not percent-encoded.
    pub fn render(&self, lookup: &dyn StateLookup) -> Result<String, NodeError> {
        let mut pairs = Vec::with_capacity(self.params.len());
        for (name, spec) in &self.params {
            let value = match spec {
                ValueSpec::Literal(value) => value.clone(),
                ValueSpec::Reference(key) => lookup.lookup(key)?,
            };
            pairs.push(format!("{name}={value}"));
        }

        if pairs.is_empty() {
            return Ok(self.base.clone());
        }
        Ok(format!("{}?{}", self.base, pairs.join("&")))
    }
}
