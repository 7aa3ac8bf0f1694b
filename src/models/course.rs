use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog entry. `available_seats` is a denormalized counter kept in
/// lockstep with the registration set by the enrollment service; it is
/// never recomputed from the registration rows on read.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub capacity: i64,
    pub available_seats: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourseRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_url: Option<String>,
    pub capacity: i64,
}
