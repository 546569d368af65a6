use std::sync::{Arc, RwLock};

use shared_types::TokenPair;

/// Tokens shared between the client and whoever persists them.
///
/// Cloning is cheap and every clone sees the same tokens, so the client can
/// clear the session on a 401 while the auth context observes the change.
#[derive(Debug, Clone, Default)]
pub struct Session {
    tokens: Arc<RwLock<Option<TokenPair>>>,
}

impl Session {
    pub fn new(tokens: Option<TokenPair>) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(tokens)),
        }
    }

    pub fn set(&self, tokens: TokenPair) {
        if let Ok(mut slot) = self.tokens.write() {
            *slot = Some(tokens);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.tokens.write() {
            *slot = None;
        }
    }

    pub fn tokens(&self) -> Option<TokenPair> {
        self.tokens.read().ok().and_then(|slot| slot.clone())
    }

    pub fn access_token(&self) -> Option<String> {
        self.tokens().map(|t| t.access_token)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.tokens().and_then(|t| t.refresh_token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> TokenPair {
        TokenPair {
            access_token: "a1".into(),
            refresh_token: Some("r1".into()),
            token_type: "bearer".into(),
        }
    }

    #[test]
    fn clones_share_state() {
        let session = Session::default();
        let other = session.clone();
        session.set(pair());
        assert_eq!(other.access_token().as_deref(), Some("a1"));
        other.clear();
        assert!(!session.is_authenticated());
        assert!(session.refresh_token().is_none());
    }
}
