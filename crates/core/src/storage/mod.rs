mod error;
mod traits;
mod types;

pub use error::{repository_error_to_status_code, DateRangeError, RepositoryError, Result};
pub use traits::{CategoryRepository, EditorRepository, UserRepository, VideoGameRepository};
pub use types::DateRange;
