mod error;
mod fixtures;
mod operations;
mod requests;
mod types;

pub use error::{ValidationError, Violation};
pub use fixtures::{seed_categories, seed_editors, seed_users, seed_video_games, DemoUser};
pub use operations::{
    category_violations, editor_violations, email_violations, is_valid_email, missing_ids,
    sanitize_reference, validate_category, validate_editor, validate_user, validate_video_game,
    video_game_violations, DESCRIPTION_MAX_LEN, DESCRIPTION_MIN_LEN, NAME_MAX_LEN, TITLE_MAX_LEN,
    TITLE_MIN_LEN, UNRESOLVED_REFERENCE,
};
pub use requests::{
    CreateCategoryRequest, CreateEditorRequest, CreateUserRequest, CreateVideoGameRequest,
    UpdateCategoryRequest, UpdateEditorRequest, UpdateUserRequest, UpdateVideoGameRequest,
};
pub use types::{
    normalize_roles, Category, CategoryDetail, Editor, EditorDetail, NewCategory, NewEditor,
    NewUser, NewVideoGame, Role, User, UserView, VideoGame, VideoGameDetail, VideoGameSummary,
    COVER_IMAGE_BASE_PATH,
};
