//! Service Layer
//!
//! Business logic behind the HTTP handlers.

pub mod catalog;
pub mod email;
pub mod feed;
pub mod jwt;
pub mod matching;
pub mod otp;
pub mod policy;
pub mod search;
pub mod user;

pub use catalog::CatalogService;
pub use email::{EmailConfig, EmailService};
pub use feed::{FeedService, FeedSort};
pub use jwt::{Claims, JwtService};
pub use matching::MatchingService;
pub use otp::{OtpOutcome, OtpService};
pub use policy::PolicyService;
pub use search::SearchService;
pub use user::{UserService, UserServiceError};
