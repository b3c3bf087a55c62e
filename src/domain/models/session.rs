use serde::{Deserialize, Serialize};

/// Authenticated-user context, passed explicitly to whatever needs it.
/// Lifecycle: `login` creates it, a session store holds it between
/// invocations, `logout` clears it. Anonymous read paths work without one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: Option<String>,
    user_id: Option<String>,
    username: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn login(token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            user_id: Some(user_id.into()),
            username: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Display name for greetings; falls back like the dashboard header.
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("User")
    }
}
