//! API Layer
//!
//! HTTP handlers, authentication middleware and route assembly.

pub mod content_handlers;
pub mod handlers;
pub mod matching_handlers;
pub mod middleware;
pub mod routes;

pub use handlers::AppState;
pub use middleware::{auth_middleware, AuthUser};
pub use routes::RouterBuilder;
