//! REST API access for the clinic backend.
//!
//! This module provides the `Backend` trait the entity services talk to and
//! `RestBackend`, its reqwest implementation.
//!
//! The backend uses bearer token authentication; the token is read from the
//! session's `token` cookie.

pub mod backend;
pub mod client;
pub mod error;

pub use backend::Backend;
pub use client::{token_from_cookies, RestBackend};
pub use error::ApiError;
