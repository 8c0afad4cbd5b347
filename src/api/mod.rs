//! HTTP client module for the remote authentication service.
//!
//! This module provides the `AuthClient` for the two external operations
//! the gate depends on: exchanging credentials for a session token and
//! checking whether a stored token is still recognized.

pub mod client;
pub mod error;

pub use client::{AuthClient, AuthResponse, Credentials, ValidationResponse};
pub use error::AuthError;
