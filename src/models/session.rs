use uuid::Uuid;

/// The caller's resolved session token.
///
/// Issued as the `sessionId` cookie on first contact and inserted into
/// request extensions by the session middleware. The token is the sole
/// ownership boundary between callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionToken(pub Uuid);

impl SessionToken {
    /// Generates a fresh token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
