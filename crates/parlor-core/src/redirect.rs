//! Post-authentication redirect bridge.
//!
//! When a sign-up or sign-in page is opened with `?redirect_url=...`, the
//! browser is sent to the token-issuing endpoint once the provider reports a
//! signed-in session. That endpoint exchanges the session for a token and
//! continues the redirect chain.

use crate::session::Session;

/// Query parameter carrying the post-authentication destination.
pub const REDIRECT_PARAM: &str = "redirect_url";

/// Performs a full-page navigation.
pub trait Navigator {
    /// Navigate to `url`.
    fn navigate(&self, url: &str);
}

/// Build `<issue_token_path>?redirect_url=<encoded>`.
///
/// The redirect is percent-encoded but otherwise forwarded as-is.
pub fn issue_token_url(issue_token_path: &str, redirect_url: &str) -> String {
    format!(
        "{issue_token_path}?{REDIRECT_PARAM}={}",
        urlencoding::encode(redirect_url)
    )
}

/// Tracks session transitions and yields the redirect target once per sign-in.
#[derive(Debug, Clone)]
pub struct RedirectBridge {
    issue_token_path: String,
    redirect_url: Option<String>,
    authenticated: bool,
}

impl RedirectBridge {
    /// Create a bridge for a page loaded with an optional `redirect_url`.
    ///
    /// An empty `redirect_url` counts as absent.
    pub fn new(issue_token_path: impl Into<String>, redirect_url: Option<String>) -> Self {
        Self {
            issue_token_path: issue_token_path.into(),
            redirect_url: redirect_url.filter(|url| !url.is_empty()),
            authenticated: false,
        }
    }

    /// The redirect captured at page load.
    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }

    /// Feed a session snapshot.
    ///
    /// Returns the navigation target on a transition from unauthenticated to
    /// authenticated when a redirect was captured, `None` otherwise. Repeated
    /// snapshots of the same signed-in session yield nothing.
    pub fn observe(&mut self, session: &Session) -> Option<String> {
        let now = session.is_authenticated();
        let entered = now && !self.authenticated;
        self.authenticated = now;

        if !entered {
            return None;
        }

        let redirect = self.redirect_url.as_deref()?;
        tracing::debug!(redirect, "session authenticated, forwarding to token endpoint");
        Some(issue_token_url(&self.issue_token_path, redirect))
    }

    /// Feed a session snapshot and navigate when [`observe`](Self::observe) fires.
    pub fn on_session_change<N>(&mut self, session: &Session, navigator: &N) -> bool
    where
        N: Navigator + ?Sized,
    {
        match self.observe(session) {
            Some(target) => {
                navigator.navigate(&target);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::session::User;

    const ISSUE_TOKEN_PATH: &str = "/api/auth/issue-token";

    #[derive(Default)]
    struct RecordingNavigator {
        visited: RefCell<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, url: &str) {
            self.visited.borrow_mut().push(url.to_string());
        }
    }

    fn signed_in() -> Session {
        Session::signed_in(User::new("user_1"))
    }

    #[test]
    fn test_issue_token_url_encodes_redirect() {
        assert_eq!(
            issue_token_url(ISSUE_TOKEN_PATH, "/dashboard"),
            "/api/auth/issue-token?redirect_url=%2Fdashboard"
        );
        assert_eq!(
            issue_token_url(ISSUE_TOKEN_PATH, "/a b?x=1&y=2"),
            "/api/auth/issue-token?redirect_url=%2Fa%20b%3Fx%3D1%26y%3D2"
        );
    }

    #[test]
    fn test_navigates_when_signed_in_with_redirect() {
        let navigator = RecordingNavigator::default();
        let mut bridge = RedirectBridge::new(ISSUE_TOKEN_PATH, Some("/dashboard".to_string()));

        assert!(!bridge.on_session_change(&Session::signed_out(), &navigator));
        assert!(bridge.on_session_change(&signed_in(), &navigator));

        assert_eq!(
            *navigator.visited.borrow(),
            vec!["/api/auth/issue-token?redirect_url=%2Fdashboard".to_string()]
        );
    }

    #[test]
    fn test_no_navigation_without_redirect() {
        let navigator = RecordingNavigator::default();
        let mut bridge = RedirectBridge::new(ISSUE_TOKEN_PATH, None);

        assert!(!bridge.on_session_change(&Session::signed_out(), &navigator));
        assert!(!bridge.on_session_change(&signed_in(), &navigator));
        assert!(navigator.visited.borrow().is_empty());
    }

    #[test]
    fn test_fires_once_per_transition() {
        let mut bridge = RedirectBridge::new(ISSUE_TOKEN_PATH, Some("/dashboard".to_string()));

        assert!(bridge.observe(&signed_in()).is_some());
        assert!(bridge.observe(&signed_in()).is_none());

        // Sign out and back in counts as a new transition.
        assert!(bridge.observe(&Session::signed_out()).is_none());
        assert!(bridge.observe(&signed_in()).is_some());
    }

    #[test]
    fn test_signed_in_flag_without_user_does_not_fire() {
        let mut bridge = RedirectBridge::new(ISSUE_TOKEN_PATH, Some("/dashboard".to_string()));
        let pending = Session {
            is_signed_in: true,
            user: None,
        };

        assert!(bridge.observe(&pending).is_none());
        assert!(bridge.observe(&signed_in()).is_some());
    }

    #[test]
    fn test_already_signed_in_on_load_fires() {
        let mut bridge = RedirectBridge::new(ISSUE_TOKEN_PATH, Some("/settings".to_string()));
        assert_eq!(
            bridge.observe(&signed_in()).as_deref(),
            Some("/api/auth/issue-token?redirect_url=%2Fsettings")
        );
        assert_eq!(bridge.redirect_url(), Some("/settings"));
    }

    #[test]
    fn test_empty_redirect_is_absent() {
        let navigator = RecordingNavigator::default();
        let mut bridge = RedirectBridge::new(ISSUE_TOKEN_PATH, Some(String::new()));

        assert_eq!(bridge.redirect_url(), None);
        assert!(bridge.observe(&signed_in()).is_none());
        assert!(!bridge.on_session_change(&Session::signed_out(), &navigator));
        assert!(!bridge.on_session_change(&signed_in(), &navigator));
        assert!(navigator.visited.borrow().is_empty());
    }
}
