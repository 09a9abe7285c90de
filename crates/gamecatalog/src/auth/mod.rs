//! Authentication for the HTTP API.
//!
//! Passwords are hashed with argon2, access tokens are HS256 JWTs carrying
//! [`gamecatalog_core::auth::Claims`].

mod extractors;
mod password;
mod token;

pub use extractors::{AdminUser, CurrentUser};
pub use password::{hash_password, verify_password};
pub use token::TokenService;
