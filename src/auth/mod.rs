//! Authentication module for managing the token session.
//!
//! This module provides:
//! - `SessionStore`: single-token persistence for the current session
//! - `SessionController`: login/logout orchestration and phase tracking
//!
//! Tokens are opaque; nothing here interprets them.

pub mod controller;
pub mod store;

pub use controller::{AuthPhase, SessionController, UserIdentity};
pub use store::SessionStore;
