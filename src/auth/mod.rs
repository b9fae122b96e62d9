//! Authentication module
//!
//! Supports: API Key (header or query), Bearer, and the password-grant
//! token request used by WHOOP.
//!
//! The `Authenticator` applies a resolved `AuthConfig` to outgoing requests.
//! `PasswordGrant` performs the one-shot token exchange; there is no
//! automatic re-authentication when a token expires mid-run.

mod authenticator;
mod types;

pub use authenticator::{Authenticator, PasswordGrant};
pub use types::{AuthConfig, Credentials, Location, Token};
