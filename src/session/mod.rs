//! Practice session state machine
//!
//! Two screens, Start and Practice. User actions and request completions
//! are applied to a [`SessionState`] through [`SessionState::apply`], which
//! returns an [`Effect`] naming the request the caller has to run.

pub mod action;
pub mod state;

pub use action::{Action, Effect};
pub use state::{PracticeItem, PracticeSession, Screen, SessionConfig, SessionState, UiStatus};
