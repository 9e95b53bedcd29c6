//! Usage: Logged-in flag exposed to the webview.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuthState {
    pub logged_in: bool,
}

impl AuthState {
    pub fn login(&mut self) -> Self {
        self.logged_in = true;
        *self
    }

    pub fn logout(&mut self) -> Self {
        self.logged_in = false;
        *self
    }
}
