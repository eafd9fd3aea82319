/// Login/logout state machine
///
/// The session lifecycle is a two-state machine with pure transition
/// functions, independent of HTTP or storage. Handlers feed it an event
/// and get back the next state plus the exact user-visible message.
///
/// # State Machine
///
/// ```text
/// anonymous     --login(valid)-->    authenticated   "Login successful"
/// anonymous     --login(invalid)-->  anonymous       "Login failed"
/// authenticated --logout-->          anonymous       "Logged out"
/// ```

use serde::{Deserialize, Serialize};

/// Message shown after a successful login
pub const MSG_LOGIN_SUCCESSFUL: &str = "Login successful";

/// Message shown after a failed login (bad or blank credentials)
pub const MSG_LOGIN_FAILED: &str = "Login failed";

/// Message shown after logout
pub const MSG_LOGGED_OUT: &str = "Logged out";

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No active session
    Anonymous,

    /// Logged in with an active session
    Authenticated,
}

/// Events that drive the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A login attempt; `credentials_valid` is the outcome of the
    /// email/password check
    Login { credentials_valid: bool },

    /// An explicit logout
    Logout,
}

impl SessionState {
    /// Applies an event, returning the next state and the message to show
    ///
    /// Pure function: session creation/deletion side effects belong to the
    /// caller, keyed off the returned state.
    pub fn apply(self, event: SessionEvent) -> (SessionState, &'static str) {
        match (self, event) {
            (SessionState::Anonymous, SessionEvent::Login { credentials_valid: true }) => {
                (SessionState::Authenticated, MSG_LOGIN_SUCCESSFUL)
            }
            (SessionState::Anonymous, SessionEvent::Login { credentials_valid: false }) => {
                (SessionState::Anonymous, MSG_LOGIN_FAILED)
            }
            (SessionState::Authenticated, SessionEvent::Logout) => {
                (SessionState::Anonymous, MSG_LOGGED_OUT)
            }
            // Re-login while authenticated behaves like a fresh attempt
            (SessionState::Authenticated, SessionEvent::Login { credentials_valid: true }) => {
                (SessionState::Authenticated, MSG_LOGIN_SUCCESSFUL)
            }
            (SessionState::Authenticated, SessionEvent::Login { credentials_valid: false }) => {
                (SessionState::Authenticated, MSG_LOGIN_FAILED)
            }
            // Logout without a session is a no-op
            (SessionState::Anonymous, SessionEvent::Logout) => {
                (SessionState::Anonymous, MSG_LOGGED_OUT)
            }
        }
    }

    /// Checks whether this state carries an active session
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }
}
