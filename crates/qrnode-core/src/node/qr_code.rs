//! Node that shows the user a QR code and advances once it has been shown.
//!
//! The encoded text is either a free-text template filled from shared state
//! or a URI assembled from configuration, see `crate::payload`.

use qrnode_types::config::QrCodeConfig;
use qrnode_types::error::NodeError;
use qrnode_types::tree::{Action, Outcome, TreeContext};

use super::{Node, NodeState};
use crate::payload::{PayloadSource, StateLookup};
use crate::render::{QrRenderer, ScriptQrRenderer};

/// Single-outcome node rendering a QR code from shared state.
#[derive(Debug, Clone)]
pub struct QrCodeNode<R = ScriptQrRenderer> {
    config: QrCodeConfig,
    source: PayloadSource,
    renderer: R,
}

impl QrCodeNode<ScriptQrRenderer> {
    /// Create a node that renders through the default script callback.
    pub fn new(config: QrCodeConfig) -> Self {
        Self::with_renderer(config, ScriptQrRenderer::default())
    }
}

impl<R: QrRenderer> QrCodeNode<R> {
    pub fn with_renderer(config: QrCodeConfig, renderer: R) -> Self {
        let source = PayloadSource::from_config(&config);
        Self {
            config,
            source,
            renderer,
        }
    }

    pub fn config(&self) -> &QrCodeConfig {
        &self.config
    }

    pub fn source(&self) -> &PayloadSource {
        &self.source
    }

    /// Build the text to encode without rendering it.
    pub fn payload(&self, lookup: &dyn StateLookup) -> Result<String, NodeError> {
        self.source.build(lookup).inspect_err(|e| {
            tracing::warn!(mode = %self.config.operation_mode, error = %e, "payload build failed");
        })
    }
}

impl<R: QrRenderer> Node for QrCodeNode<R> {
    fn outcomes(&self) -> Vec<Outcome> {
        vec![Outcome::single()]
    }

    fn process(&self, context: &TreeContext) -> Result<Action, NodeError> {
        match NodeState::observe(context) {
            NodeState::Completed => {
                tracing::debug!("qr code already rendered, advancing");
                Ok(Action::goto_next())
            }
            NodeState::AwaitingRender => {
                let payload = self.payload(&context.shared_state)?;
                tracing::debug!(
                    mode = %self.config.operation_mode,
                    payload_len = payload.len(),
                    "sending qr code callback"
                );
                let callback = self.renderer.render(&payload)?;
                Ok(Action::send(callback))
            }
        }
    }
}
