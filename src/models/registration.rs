use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A student's seat in a course. At most one row per
/// `(course_id, student_email)` pair, enforced by a unique index.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: String,
    pub course_id: i64,
    pub student_email: String,
    pub student_name: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollRequest {
    pub course_id: i64,
    pub student_name: String,
    pub student_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropRequest {
    pub course_id: i64,
    pub student_email: String,
}

/// Admin roster row: a registration joined with its course title.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RosterEntry {
    pub id: String,
    pub student_name: String,
    pub student_email: String,
    pub course_title: String,
    pub created_at: String,
}
