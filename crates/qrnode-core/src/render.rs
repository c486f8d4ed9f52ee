//! QR rendering adapter.
//!
//! Turns a payload into the callback the host sends to the user agent. The
//! node never draws the QR code itself: `ScriptQrRenderer` emits a script
//! that the user agent runs to draw it, and hosts with their own generator
//! can plug in any `QrRenderer`.

use qrnode_types::error::NodeError;
use qrnode_types::tree::Callback;

/// Element id of the first callback slot in the host's login page.
pub const DEFAULT_CALLBACK_ELEMENT_ID: &str = "callback_0";

/// Wraps payload text into a host callback.
pub trait QrRenderer {
    fn render(&self, text: &str) -> Result<Callback, NodeError>;
}

impl<F> QrRenderer for F
where
    F: Fn(&str) -> Result<Callback, NodeError>,
{
    fn render(&self, text: &str) -> Result<Callback, NodeError> {
        self(text)
    }
}

/// Renders a `ScriptTextOutput` callback that draws the QR code in the
/// browser with the `QRCode` library the host page ships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptQrRenderer {
    element_id: String,
}

impl ScriptQrRenderer {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }
}

impl Default for ScriptQrRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_CALLBACK_ELEMENT_ID)
    }
}

impl QrRenderer for ScriptQrRenderer {
    fn render(&self, text: &str) -> Result<Callback, NodeError> {
        let text = script_string(text)?;
        let element_id = script_string(&self.element_id)?;
        let script = format!(
            "(function () {{\n\
             \x20   var target = document.getElementById({element_id});\n\
             \x20   if (!target) {{ return; }}\n\
             \x20   var container = document.createElement(\"div\");\n\
             \x20   container.className = \"qrcode-container\";\n\
             \x20   target.parentNode.insertBefore(container, target);\n\
             \x20   new QRCode(container, {{ text: {text}, correctLevel: QRCode.CorrectLevel.L }});\n\
             }})();"
        );
        Ok(Callback::script(script))
    }
}

/// Encode `value` as a JavaScript string literal safe to place inline in
/// a `<script>` element. U+2028 and U+2029 end a string literal in older
/// engines, so they are escaped too.
fn script_string(value: &str) -> Result<String, NodeError> {
    let literal =
        serde_json::to_string(value).map_err(|e| NodeError::RenderFailed(e.to_string()))?;
    Ok(literal
        .replace("</", "<\\/")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
}
