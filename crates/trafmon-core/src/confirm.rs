// ── Confirmation seam for destructive actions ──
//
// Core never talks to a terminal. Whoever drives a destructive action
// supplies something that can answer a yes/no question: a dialoguer prompt
// in the CLI, an already-answered dialog in the TUI, a fixed answer in
// tests or under `--yes`.

/// Prompt shown before a user is deleted.
pub const DELETE_USER_PROMPT: &str = "Are you sure you want to delete this user?";

/// Answers a yes/no question before a destructive request is sent.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// A fixed answer, for `--yes` and for dialogs answered up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preapproved(pub bool);

impl Confirm for Preapproved {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// What happened to an action that needed confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The request was sent and succeeded.
    Applied,
    /// Confirmation was declined; nothing was sent.
    Declined,
}
