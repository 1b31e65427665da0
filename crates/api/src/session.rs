use std::fmt;

/// Admin credentials resolved once at start-up and handed to the client.
///
/// A session without a token is valid; requests built from it simply carry no
/// `Authorization` header and are rejected by the backend.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// Blank or whitespace-only tokens are treated as absent.
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub(crate) fn authorization_header(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {token}"))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_anonymous() {
        assert!(!Session::new(Some("   ".into())).is_authenticated());
        assert!(!Session::new(None).is_authenticated());
        assert_eq!(Session::new(Some(" abc ".into())).token(), Some("abc"));
    }

    #[test]
    fn debug_output_hides_token() {
        let rendered = format!("{:?}", Session::new(Some("super-secret".into())));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
