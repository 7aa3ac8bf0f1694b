use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Attendance/marks record shadowing a registration. Exists if and only if
/// the matching registration exists; the two are created and deleted
/// together by the enrollment service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attendance {
    pub course_id: i64,
    pub student_email: String,
    pub percentage: i64,
    pub isa1: i64,
    pub isa2: i64,
    pub esa: i64,
}

/// Dashboard row: a student's marks joined with the course title.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentMarks {
    pub course_title: String,
    pub percentage: i64,
    pub isa1: i64,
    pub isa2: i64,
    pub esa: i64,
}
