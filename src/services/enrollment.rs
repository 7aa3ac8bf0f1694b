use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::repository;
use crate::error::AppError;
use crate::models::{DropRequest, EnrollRequest, Registration};
use crate::services::MarksPolicy;

/// The seat-accounting core: registers and unregisters students while
/// keeping `available_seats` consistent with the registration and
/// attendance rows. Handlers run concurrently and share no in-process
/// state, so both operations lean on the store for serialization: the seat
/// counter only ever moves through single conditional UPDATEs, and the
/// unique `(course_id, student_email)` index arbitrates duplicate enrolls.
pub struct EnrollmentService {
    db: SqlitePool,
    marks: Arc<dyn MarksPolicy>,
}

impl EnrollmentService {
    pub fn new(db: SqlitePool, marks: Arc<dyn MarksPolicy>) -> Self {
        Self { db, marks }
    }

    /// Registers a student: one seat consumed, one registration row, one
    /// attendance row, all committed together or not at all.
    pub async fn enroll(&self, req: EnrollRequest) -> Result<Registration, AppError> {
        let course = repository::find_course_by_id(&self.db, req.course_id)
            .await?
            .ok_or(AppError::CourseNotFound)?;

        if course.available_seats < 1 {
            return Err(AppError::CourseFull);
        }

        if repository::registration_exists(&self.db, req.course_id, &req.student_email).await? {
            return Err(AppError::AlreadyRegistered);
        }

        // The reads above are advisory: the decrement below re-checks the
        // seat atomically, and the unique index re-checks the duplicate.
        let mut tx = self.db.begin().await?;

        let claimed = sqlx::query(
            "UPDATE courses SET available_seats = available_seats - 1 \
             WHERE id = ? AND available_seats >= 1",
        )
        .bind(req.course_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if claimed == 0 {
            // A concurrent enroll took the last seat between the read and
            // the update.
            return Err(AppError::CourseFull);
        }

        let registration = Registration {
            id: Uuid::new_v4().to_string(),
            course_id: req.course_id,
            student_email: req.student_email,
            student_name: req.student_name,
            created_at: Utc::now().to_rfc3339(),
        };

        sqlx::query(
            "INSERT INTO registrations (id, course_id, student_email, student_name, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&registration.id)
        .bind(registration.course_id)
        .bind(&registration.student_email)
        .bind(&registration.student_name)
        .bind(&registration.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::AlreadyRegistered
            } else {
                AppError::Database(e)
            }
        })?;

        let marks = self.marks.initial_marks();
        sqlx::query(
            "INSERT INTO attendance (course_id, student_email, percentage, isa1, isa2, esa) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(registration.course_id)
        .bind(&registration.student_email)
        .bind(marks.percentage)
        .bind(marks.isa1)
        .bind(marks.isa2)
        .bind(marks.esa)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            "enrolled {} in course {}",
            registration.student_email, registration.course_id
        );
        Ok(registration)
    }

    /// Unregisters a student. Idempotent: dropping a student who was never
    /// registered succeeds without touching the seat counter. Returns
    /// whether a registration was actually removed.
    pub async fn withdraw(&self, req: DropRequest) -> Result<bool, AppError> {
        let mut tx = self.db.begin().await?;

        let removed = sqlx::query(
            "DELETE FROM registrations WHERE course_id = ? AND student_email = ?",
        )
        .bind(req.course_id)
        .bind(&req.student_email)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query("DELETE FROM attendance WHERE course_id = ? AND student_email = ?")
            .bind(req.course_id)
            .bind(&req.student_email)
            .execute(&mut *tx)
            .await?;

        if removed > 0 {
            // Refund the seat, clamped at capacity so repeated drops can
            // never inflate the counter past the course's real size.
            sqlx::query(
                "UPDATE courses SET available_seats = available_seats + 1 \
                 WHERE id = ? AND available_seats < capacity",
            )
            .bind(req.course_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        if removed > 0 {
            info!(
                "dropped {} from course {}",
                req.student_email, req.course_id
            );
        } else {
            debug!(
                "drop for {} on course {} matched no registration",
                req.student_email, req.course_id
            );
        }
        Ok(removed > 0)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}
