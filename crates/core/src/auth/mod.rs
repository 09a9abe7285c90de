mod error;
mod functions;
mod types;

pub use error::AuthError;
pub use functions::{can_manage_catalog, can_modify_user, claims_for, is_token_expired, parse_bearer};
pub use types::Claims;
