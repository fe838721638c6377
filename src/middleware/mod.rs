pub mod auth;
pub mod require_role;
pub mod response;

pub use auth::authenticate;
pub use require_role::require_admin;
pub use response::{ApiResponse, ApiResult};
