use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated user as exposed by the authentication provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable ID, merged into every event the user creates
    pub id: Uuid,
    pub email: Option<String>,
    /// Display name from the provider's user metadata
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(id: Uuid, email: Option<String>) -> Self {
        Self {
            id,
            email,
            display_name: None,
        }
    }

    fn email_local_part(&self) -> &str {
        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .unwrap_or_default()
    }

    /// Name shown in the user menu: metadata display name, else the email local part
    pub fn display_name(&self) -> String {
        match self.display_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.email_local_part().to_string(),
        }
    }

    /// Avatar fallback: first two characters of the email local part, upper-cased
    pub fn initials(&self) -> String {
        self.email_local_part()
            .chars()
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}
