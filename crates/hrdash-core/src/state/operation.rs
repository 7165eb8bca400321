// Flat request-status container used by logout, password change and
// profile edit.

use super::Reducer;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationState {
    pub loading: bool,
    pub success: bool,
    pub error: bool,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationEvent {
    Pending,
    Fulfilled,
    Rejected { message: String },
    Reset,
}

impl Reducer for OperationState {
    type Event = OperationEvent;

    fn reduce(&mut self, event: OperationEvent) -> bool {
        let next = match event {
            OperationEvent::Pending => Self {
                loading: true,
                ..Self::default()
            },
            OperationEvent::Fulfilled => Self {
                success: true,
                ..Self::default()
            },
            OperationEvent::Rejected { message } => Self {
                error: true,
                error_message: Some(message),
                ..Self::default()
            },
            OperationEvent::Reset => Self::default(),
        };
        if *self == next {
            return false;
        }
        *self = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle() {
        let mut state = OperationState::default();
        assert!(state.reduce(OperationEvent::Pending));
        assert!(state.loading && !state.success && !state.error);

        assert!(state.reduce(OperationEvent::Fulfilled));
        assert!(!state.loading && state.success);

        state.reduce(OperationEvent::Rejected {
            message: "Failed to Change Password".into(),
        });
        assert!(state.error && !state.success);
        assert_eq!(state.error_message.as_deref(), Some("Failed to Change Password"));
    }

    #[test]
    fn reset_on_default_is_a_no_op() {
        let mut state = OperationState::default();
        assert!(!state.reduce(OperationEvent::Reset));
    }
}
