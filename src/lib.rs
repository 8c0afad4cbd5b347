//! Tokengate - a minimal client-side login gate.
//!
//! Credentials go to a remote authentication endpoint; the opaque token that
//! comes back is persisted for the session; the protected view is gated on
//! that token in two phases (a synchronous presence check, then an advisory
//! server-side revalidation).

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod gate;
