// Session lifecycle state.

use hrdash_api::{BearerToken, UserInfo};
use strum::Display;

use super::Reducer;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum AuthPhase {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
    LoggingOut,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub phase: AuthPhase,
    pub loading: bool,
    pub error: bool,
    pub error_message: Option<String>,
    /// Blank while anonymous; requests still carry an empty bearer.
    pub token: BearerToken,
    pub user: Option<UserInfo>,
}

#[derive(Debug, Clone)]
pub enum AuthEvent {
    LoginPending,
    LoginFulfilled { token: BearerToken, user: UserInfo },
    LoginRejected { message: String },
    LogoutPending,
    LogoutFulfilled,
    LogoutRejected,
    /// The server refused `token`, or a password change invalidated it.
    ///
    /// Only ends a settled session still holding that same token.
    SessionEnded {
        token: BearerToken,
        message: Option<String>,
    },
    ProfileUpdated {
        full_name: Option<String>,
        email: Option<String>,
    },
    Reset,
}

impl AuthState {
    /// State for a session read back from durable storage.
    pub fn restored(token: BearerToken, user: UserInfo) -> Self {
        Self {
            phase: AuthPhase::Authenticated,
            token,
            user: Some(user),
            ..Self::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }

    fn sign_out(&mut self) {
        self.phase = AuthPhase::Anonymous;
        self.loading = false;
        self.token = BearerToken::none();
        self.user = None;
    }
}

impl Reducer for AuthState {
    type Event = AuthEvent;

    fn reduce(&mut self, event: AuthEvent) -> bool {
        match (self.phase, event) {
            (AuthPhase::Anonymous | AuthPhase::Authenticated, AuthEvent::LoginPending) => {
                self.phase = AuthPhase::Authenticating;
                self.loading = true;
                self.error = false;
                self.error_message = None;
            }
            (AuthPhase::Authenticating, AuthEvent::LoginFulfilled { token, user }) => {
                self.phase = AuthPhase::Authenticated;
                self.loading = false;
                self.error = false;
                self.token = token;
                self.user = Some(user);
            }
            (AuthPhase::Authenticating, AuthEvent::LoginRejected { message }) => {
                self.sign_out();
                self.error = true;
                self.error_message = Some(message);
            }
            (AuthPhase::Authenticated, AuthEvent::LogoutPending) => {
                self.phase = AuthPhase::LoggingOut;
                self.loading = true;
            }
            (AuthPhase::LoggingOut, AuthEvent::LogoutFulfilled) => {
                self.sign_out();
                self.error = false;
                self.error_message = None;
            }
            (AuthPhase::LoggingOut, AuthEvent::LogoutRejected) => {
                self.phase = AuthPhase::Authenticated;
                self.loading = false;
            }
            (
                AuthPhase::Authenticated | AuthPhase::LoggingOut,
                AuthEvent::SessionEnded { token, message },
            ) if token == self.token => {
                self.sign_out();
                self.error = message.is_some();
                self.error_message = message;
            }
            (
                AuthPhase::Authenticated,
                AuthEvent::ProfileUpdated { full_name, email },
            ) => {
                let Some(user) = self.user.as_mut() else {
                    return false;
                };
                if let Some(full_name) = full_name {
                    user.full_name = full_name;
                }
                if let Some(email) = email {
                    user.email = email;
                }
            }
            (_, AuthEvent::Reset) => *self = Self::default(),
            _ => return false,
        }
        true
    }
}
