//! Session state observed from the external identity provider.
//!
//! The provider owns the session. Parlor only deserializes what the provider
//! reports and reads it; nothing here mutates provider state.

use serde::{Deserialize, Serialize};

/// A signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Provider user identifier.
    pub id: String,

    /// Primary email address, if shared by the provider.
    #[serde(default)]
    pub email: Option<String>,

    /// Display name, if shared by the provider.
    #[serde(default, alias = "fullName")]
    pub display_name: Option<String>,
}

impl User {
    /// Create a user with only an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
            display_name: None,
        }
    }

    /// Name to show in the UI, falling back to email and then id.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}

/// Current session snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Provider-reported signed-in flag.
    #[serde(default, alias = "isSignedIn")]
    pub is_signed_in: bool,

    /// The signed-in user.
    #[serde(default)]
    pub user: Option<User>,
}

impl Session {
    /// A signed-out session.
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// A signed-in session for `user`.
    pub fn signed_in(user: User) -> Self {
        Self {
            is_signed_in: true,
            user: Some(user),
        }
    }

    /// Signed in and carrying a user record.
    ///
    /// Providers can report `is_signed_in` before the user record has loaded,
    /// so both must be present.
    pub fn is_authenticated(&self) -> bool {
        self.is_signed_in && self.user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_default_is_signed_out() {
        let session = Session::default();
        assert!(!session.is_signed_in);
        assert!(!session.is_authenticated());
        assert_eq!(session, Session::signed_out());
    }

    #[test]
    fn test_signed_in_without_user_is_not_authenticated() {
        let session = Session {
            is_signed_in: true,
            user: None,
        };
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_session_deserialize_provider_payload() {
        let json = r#"{"isSignedIn":true,"user":{"id":"user_1","fullName":"Ada","extra":1}}"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert!(session.is_authenticated());
        let user = session.user.unwrap();
        assert_eq!(user.id, "user_1");
        assert_eq!(user.label(), "Ada");
    }

    #[test]
    fn test_user_label_fallbacks() {
        let mut user = User::new("user_2");
        assert_eq!(user.label(), "user_2");
        user.email = Some("ada@example.com".to_string());
        assert_eq!(user.label(), "ada@example.com");
    }
}
