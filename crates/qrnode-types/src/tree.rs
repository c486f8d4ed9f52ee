//! Types describing the host's authentication tree as seen by one node:
//! the shared state it reads, the callbacks it sends and receives, and the
//! action it hands back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::NodeError;

/// Id of the only outcome a single-outcome node exposes.
pub const SINGLE_OUTCOME_ID: &str = "outcome";

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Per-attempt key-value scratch space maintained by the host.
///
/// Nodes in this crate only read from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SharedState(Map<String, Value>);

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Read a value as text.
    ///
    /// Strings are returned verbatim, numbers and booleans in their display
    /// form, arrays and objects as compact JSON. A missing key and an
    /// explicit `null` are both undefined references.
    pub fn get_string(&self, key: &str) -> Result<String, NodeError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Err(NodeError::UndefinedReference(key.to_string())),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Bool(b)) => Ok(b.to_string()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(other) => Ok(other.to_string()),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for SharedState {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for SharedState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ---------------------------------------------------------------------------
// Callbacks
// ---------------------------------------------------------------------------

/// A request for user-facing interaction, or the user's answer to one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Callback {
    /// Script the user agent runs; its message comes back once executed.
    ScriptTextOutput { message: String },
    /// Plain text shown to the user.
    TextOutput { message: String },
    HiddenValue { id: String, value: String },
}

/// Discriminant of `Callback`, used to look callbacks up by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackKind {
    ScriptTextOutput,
    TextOutput,
    HiddenValue,
}

impl Callback {
    pub fn script(message: impl Into<String>) -> Self {
        Callback::ScriptTextOutput {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> CallbackKind {
        match self {
            Callback::ScriptTextOutput { .. } => CallbackKind::ScriptTextOutput,
            Callback::TextOutput { .. } => CallbackKind::TextOutput,
            Callback::HiddenValue { .. } => CallbackKind::HiddenValue,
        }
    }

    /// The message of output callbacks; `None` for hidden values.
    pub fn message(&self) -> Option<&str> {
        match self {
            Callback::ScriptTextOutput { message } | Callback::TextOutput { message } => {
                Some(message.as_str())
            }
            Callback::HiddenValue { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tree context
// ---------------------------------------------------------------------------

/// Everything the host hands a node for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeContext {
    #[serde(default)]
    pub shared_state: SharedState,
    /// Callbacks submitted back by the user agent on this request.
    #[serde(default)]
    pub callbacks: Vec<Callback>,
}

impl TreeContext {
    pub fn new(shared_state: SharedState) -> Self {
        Self {
            shared_state,
            callbacks: Vec::new(),
        }
    }

    pub fn with_callback(mut self, callback: Callback) -> Self {
        self.callbacks.push(callback);
        self
    }

    /// First submitted callback of the given kind.
    pub fn get_callback(&self, kind: CallbackKind) -> Option<&Callback> {
        self.callbacks.iter().find(|cb| cb.kind() == kind)
    }
}

// ---------------------------------------------------------------------------
// Outcomes and actions
// ---------------------------------------------------------------------------

/// A named exit of a node, wired by the host to the next step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub id: String,
    pub display_name: String,
}

impl Outcome {
    pub fn single() -> Self {
        Self {
            id: SINGLE_OUTCOME_ID.to_string(),
            display_name: "Outcome".to_string(),
        }
    }
}

/// What the host should do after a node returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Leave this node through the named outcome.
    Advance { outcome: String },
    /// Deliver these callbacks and invoke the same node again on reply.
    Send { callbacks: Vec<Callback> },
}

impl Action {
    /// Advance through the single outcome.
    pub fn goto_next() -> Self {
        Action::Advance {
            outcome: SINGLE_OUTCOME_ID.to_string(),
        }
    }

    pub fn send(callback: Callback) -> Self {
        Action::Send {
            callbacks: vec![callback],
        }
    }

    pub fn is_advance(&self) -> bool {
        matches!(self, Action::Advance { .. })
    }
}
