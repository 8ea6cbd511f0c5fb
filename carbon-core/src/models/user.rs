use serde::{Deserialize, Serialize};

/// The authenticated user as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
}

impl User {
    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// Response of the session check endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionStatus {
    #[serde(default)]
    pub is_logged_in: bool,
    #[serde(default)]
    pub user: Option<User>,
}

impl SessionStatus {
    /// The user, only when the backend says the session is live.
    pub fn into_user(self) -> Option<User> {
        if self.is_logged_in { self.user } else { None }
    }
}
