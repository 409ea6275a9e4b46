//! Delete-confirmation dialog state

/// Visibility of the delete-confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Open,
}

/// Inputs that move the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    /// The danger-zone delete affordance was used
    Trigger,
    /// The user backed out
    Cancel,
    DeleteSucceeded,
    /// Stays open so the user can retry or cancel
    DeleteFailed,
}

impl DialogState {
    /// Next state after `event`. Events that do not apply leave the state as is.
    pub fn on(self, event: DialogEvent) -> Self {
        match (self, event) {
            (DialogState::Closed, DialogEvent::Trigger) => DialogState::Open,
            (DialogState::Open, DialogEvent::Cancel) => DialogState::Closed,
            (DialogState::Open, DialogEvent::DeleteSucceeded) => DialogState::Closed,
            (state, _) => state,
        }
    }

    pub fn is_open(self) -> bool {
        self == DialogState::Open
    }
}
