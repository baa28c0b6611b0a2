//! Preview/reset session state machine.
//!
//! Two states, two actions, a pure transition function. `preview` always
//! recomputes from the caller's current inputs; there is no incremental
//! update path.

use super::FilterResult;
use crate::error::SelectError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Previewed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Preview,
    Reset,
}

/// Pure transition function, decoupled from any rendering concern.
pub fn transition(_state: SessionState, action: SessionAction) -> SessionState {
    match action {
        SessionAction::Preview => SessionState::Previewed,
        SessionAction::Reset => SessionState::Idle,
    }
}

/// One user's selection session. Owns the toggle and the materialized
/// result; never shared across users.
#[derive(Debug, Default)]
pub struct SelectionSession {
    state: SessionState,
    result: Option<FilterResult>,
}

impl SelectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The materialized result, present only in `Previewed`.
    pub fn result(&self) -> Option<&FilterResult> {
        self.result.as_ref()
    }

    /// Run `compute` against current inputs and materialize its result.
    /// On error the session is left untouched.
    pub fn preview<F>(&mut self, compute: F) -> Result<&FilterResult, SelectError>
    where
        F: FnOnce() -> Result<FilterResult, SelectError>,
    {
        let result = compute()?;
        self.state = transition(self.state, SessionAction::Preview);
        Ok(&*self.result.insert(result))
    }

    /// Discard any materialized result.
    pub fn reset(&mut self) {
        self.state = transition(self.state, SessionAction::Reset);
        self.result = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::{SelectionMode, SessionAction::*, SessionState::*};

    fn empty_result() -> FilterResult {
        FilterResult {
            mode: SelectionMode::Distance,
            matched: Vec::new(),
            total: 0,
            skipped_features: Vec::new(),
        }
    }

    #[test]
    fn test_transition_table() {
        assert_eq!(transition(Idle, Preview), Previewed);
        assert_eq!(transition(Previewed, Preview), Previewed);
        assert_eq!(transition(Idle, Reset), Idle);
        assert_eq!(transition(Previewed, Reset), Idle);
    }

    #[test]
    fn test_preview_materializes_result() {
        let mut session = SelectionSession::new();
        assert_eq!(session.state(), Idle);
        assert!(session.result().is_none());

        session.preview(|| Ok(empty_result())).unwrap();
        assert_eq!(session.state(), Previewed);
        assert!(session.result().is_some());
    }

    #[test]
    fn test_reset_discards_result() {
        let mut session = SelectionSession::new();
        session.preview(|| Ok(empty_result())).unwrap();
        session.reset();
        assert_eq!(session.state(), Idle);
        assert!(session.result().is_none());
    }

    #[test]
    fn test_failed_preview_leaves_session_untouched() {
        let mut session = SelectionSession::new();
        session.preview(|| Ok(empty_result())).unwrap();

        let err = session.preview(|| Err(SelectError::EmptySelection { supplied: 0 }));
        assert!(err.is_err());
        assert_eq!(session.state(), Previewed);
        assert!(session.result().is_some());
    }
}
