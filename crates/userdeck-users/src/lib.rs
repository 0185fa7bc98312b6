//! Untrusted-input pipeline for user profiles: schema validation, a
//! typed fetch helper, and the cache-first user service.

pub mod error;
pub mod fetch;
pub mod service;
pub mod types;
pub mod validate;

pub use error::UserError;
pub use fetch::FetchError;
pub use service::{UserService, USERS_CACHE_KEY};
pub use types::{ApiInfo, ApiResponse, User, UserLocation, UserName, UserPicture};
pub use validate::{
    validate_api_response, validate_user, validate_users, FieldIssue, ValidationError,
};
