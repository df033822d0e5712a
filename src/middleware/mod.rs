pub mod auth;
pub mod validate_body;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use validate_body::{validate_body, UploadedFiles, ValidatedBody};
