mod api;
mod identity;

pub use self::api::ApiResponse;
pub use self::identity::{AuthenticatedUser, Role};
