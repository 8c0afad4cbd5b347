//! Two-phase view gating.
//!
//! The gate runs in two named phases. `initial_gate` reads the session store
//! once, synchronously, and picks the view to show first. `background_revalidate`
//! then asks the server whether the stored token is still good and may demote
//! `Protected` back to `Login`. The split is a UX optimization - show the
//! likely-right view immediately, correct it when the advisory answer lands.
//! It is not a security boundary: the server authorizes every real request
//! regardless of which view is on screen.

use crate::auth::{SessionController, SessionStore};

/// Which view to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Protected,
}

/// Phase one: synchronous gate on token presence.
/// The protected view is never chosen without a stored token.
pub fn initial_gate(store: &SessionStore) -> View {
    if store.token().is_some() {
        View::Protected
    } else {
        View::Login
    }
}

/// Phase two: asynchronous advisory confirmation of the stored token
pub async fn background_revalidate(controller: &SessionController) -> View {
    if controller.check_stored_token().await {
        View::Protected
    } else {
        View::Login
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_gate_on_token_presence() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SessionStore::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(initial_gate(&store), View::Login);

        store.set_token(Some("abc123")).unwrap();
        assert_eq!(initial_gate(&store), View::Protected);

        store.set_token(None).unwrap();
        assert_eq!(initial_gate(&store), View::Login);
    }
}
