//! Authentication tree nodes.
//!
//! A node is invoked by the host once per request with a `TreeContext` and
//! answers with an `Action`: either send callbacks and stay, or advance
//! through one of its outcomes.

pub mod qr_code;

use qrnode_types::error::NodeError;
use qrnode_types::tree::{Action, CallbackKind, Outcome, TreeContext};

pub use self::qr_code::QrCodeNode;

/// A step in a host-managed authentication tree.
pub trait Node {
    /// Exits the host may wire to next steps.
    fn outcomes(&self) -> Vec<Outcome>;

    /// Handle one invocation.
    fn process(&self, context: &TreeContext) -> Result<Action, NodeError>;
}

/// Where a render-then-resume node stands for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Nothing has been rendered for this request yet.
    AwaitingRender,
    /// The user agent answered the rendered callback; control leaves the node.
    Completed,
}

impl NodeState {
    /// Decide from whether the previous rendered output came back non-empty.
    pub fn dispatch(prior_output_non_empty: bool) -> Self {
        if prior_output_non_empty {
            NodeState::Completed
        } else {
            NodeState::AwaitingRender
        }
    }

    /// Inspect the submitted callbacks for a non-empty script output.
    pub fn observe(context: &TreeContext) -> Self {
        let answered = context
            .get_callback(CallbackKind::ScriptTextOutput)
            .and_then(|callback| callback.message())
            .is_some_and(|message| !message.is_empty());
        Self::dispatch(answered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrnode_types::tree::Callback;

    #[test]
    fn test_dispatch() {
        assert_eq!(NodeState::dispatch(true), NodeState::Completed);
        assert_eq!(NodeState::dispatch(false), NodeState::AwaitingRender);
    }

    #[test]
    fn test_observe_fresh_request() {
        assert_eq!(
            NodeState::observe(&TreeContext::default()),
            NodeState::AwaitingRender
        );
    }

    #[test]
    fn test_observe_empty_script_output_keeps_waiting() {
        let ctx = TreeContext::default().with_callback(Callback::script(""));
        assert_eq!(NodeState::observe(&ctx), NodeState::AwaitingRender);
    }

    #[test]
    fn test_observe_other_callback_kinds_are_ignored() {
        let ctx = TreeContext::default().with_callback(Callback::TextOutput {
            message: "shown".to_string(),
        });
        assert_eq!(NodeState::observe(&ctx), NodeState::AwaitingRender);
    }

    #[test]
    fn test_observe_answered_script_output() {
        let ctx = TreeContext::default().with_callback(Callback::script("rendered"));
        assert_eq!(NodeState::observe(&ctx), NodeState::Completed);
    }
}
