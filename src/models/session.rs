//! Session model
//!
//! Client-side view of the server session. The cookie held by the HTTP client
//! is the source of truth; this value is never persisted.

use super::UserProfile;

/// Authentication state of the client.
///
/// The user profile only exists in the `Authenticated` variant, so the
/// "authenticated" flag and the user can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    /// The current-user lookup has not finished yet
    #[default]
    Loading,
    /// No valid server session
    Anonymous,
    /// Signed in as the given user
    Authenticated(UserProfile),
}

impl Session {
    /// True until the first current-user lookup completes
    pub fn is_loading(&self) -> bool {
        matches!(self, Session::Loading)
    }

    /// True only when a user is signed in
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    /// The signed-in user, if any
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Session::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// ID of the signed-in user, if any
    pub fn user_id(&self) -> Option<i64> {
        self.user().map(|u| u.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: 1,
            user_name: "hana".to_string(),
            email: "hana@example.com".to_string(),
        }
    }

    #[test]
    fn test_session_starts_loading() {
        let session = Session::default();

        assert!(session.is_loading());
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_authenticated_session_exposes_user() {
        let session = Session::Authenticated(profile());

        assert!(session.is_authenticated());
        assert!(!session.is_loading());
        assert_eq!(session.user_id(), Some(1));
    }

    #[test]
    fn test_anonymous_session_has_no_user() {
        let session = Session::Anonymous;

        assert!(!session.is_authenticated());
        assert_eq!(session.user_id(), None);
    }
}
