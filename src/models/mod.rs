//! Data Models Module
//!
//! This module contains all data structures used throughout the service:
//! entities, request/response types, and profile shapes.

pub mod course;
pub mod feed;
pub mod profile;
pub mod request;
pub mod requests;
pub mod search;
pub mod session;
pub mod user;

// Re-export commonly used types
pub use course::{Course, CourseRef};
pub use feed::{Feed, Policy};
pub use profile::{Profile, StudentProfile, TutorProfile};
pub use request::{RequestSummary, TutorRequest, TutorSummary};
pub use requests::*;
pub use search::{SearchHit, SearchOrigin};
pub use session::{OtpCode, Session};
pub use user::{DeactivatedUser, User, UserRole, UserSummary};
