//! Profile response shapes for students and tutors

use serde::Serialize;

use super::course::CourseRef;
use super::feed::Feed;

/// Student profile: user info plus interest list and feed history
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub student_id: i64,
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    pub interests: Vec<CourseRef>,
    pub feeds: Vec<Feed>,
}

/// Tutor profile: user info, tutoring attributes, course list, feed history
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorProfile {
    pub tutor_id: i64,
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    pub bio: String,
    pub websites: String,
    pub mail_subscription: bool,
    pub interests: Vec<CourseRef>,
    pub feeds: Vec<Feed>,
}

/// Either profile shape, tagged by role
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Profile {
    Student(StudentProfile),
    Tutor(TutorProfile),
}
