use sqlx::SqlitePool;

use crate::models::{Attendance, Course, NewCourseRequest, Registration, RosterEntry, StudentMarks};

pub async fn fetch_courses(db: &SqlitePool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, title, description, image_url, capacity, available_seats \
         FROM courses ORDER BY id",
    )
    .fetch_all(db)
    .await
}

pub async fn find_course_by_id(db: &SqlitePool, id: i64) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, title, description, image_url, capacity, available_seats \
         FROM courses WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Out-of-band provisioning channel for course rows. A new course starts
/// with every seat available.
pub async fn insert_course(
    db: &SqlitePool,
    req: NewCourseRequest,
) -> Result<Course, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO courses (title, description, image_url, capacity, available_seats) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&req.title)
    .bind(&req.description)
    .bind(&req.image_url)
    .bind(req.capacity)
    .bind(req.capacity)
    .execute(db)
    .await?;

    Ok(Course {
        id: result.last_insert_rowid(),
        title: req.title,
        description: req.description,
        image_url: req.image_url,
        capacity: req.capacity,
        available_seats: req.capacity,
    })
}

pub async fn registration_exists(
    db: &SqlitePool,
    course_id: i64,
    student_email: &str,
) -> Result<bool, sqlx::Error> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM registrations WHERE course_id = ? AND student_email = ?",
    )
    .bind(course_id)
    .bind(student_email)
    .fetch_one(db)
    .await?;

    Ok(count > 0)
}

pub async fn fetch_registrations_for_student(
    db: &SqlitePool,
    student_email: &str,
) -> Result<Vec<Registration>, sqlx::Error> {
    sqlx::query_as::<_, Registration>(
        "SELECT id, course_id, student_email, student_name, created_at \
         FROM registrations WHERE student_email = ? ORDER BY created_at DESC",
    )
    .bind(student_email)
    .fetch_all(db)
    .await
}

/// Every registration joined with its course title, newest first. Feeds the
/// admin roster view.
pub async fn fetch_roster(db: &SqlitePool) -> Result<Vec<RosterEntry>, sqlx::Error> {
    sqlx::query_as::<_, RosterEntry>(
        "SELECT r.id, r.student_name, r.student_email, c.title AS course_title, r.created_at \
         FROM registrations r \
         JOIN courses c ON c.id = r.course_id \
         ORDER BY r.created_at DESC",
    )
    .fetch_all(db)
    .await
}

pub async fn fetch_marks_for_student(
    db: &SqlitePool,
    student_email: &str,
) -> Result<Vec<StudentMarks>, sqlx::Error> {
    sqlx::query_as::<_, StudentMarks>(
        "SELECT c.title AS course_title, a.percentage, a.isa1, a.isa2, a.esa \
         FROM attendance a \
         JOIN courses c ON c.id = a.course_id \
         WHERE a.student_email = ? \
         ORDER BY c.id",
    )
    .bind(student_email)
    .fetch_all(db)
    .await
}

pub async fn find_attendance(
    db: &SqlitePool,
    course_id: i64,
    student_email: &str,
) -> Result<Option<Attendance>, sqlx::Error> {
    sqlx::query_as::<_, Attendance>(
        "SELECT course_id, student_email, percentage, isa1, isa2, esa \
         FROM attendance WHERE course_id = ? AND student_email = ?",
    )
    .bind(course_id)
    .bind(student_email)
    .fetch_optional(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> SqlitePool {
        // Single connection so every query sees the same in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test db");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    #[tokio::test]
    async fn test_insert_and_fetch_course() {
        let pool = setup_test_db().await;

        let req = NewCourseRequest {
            title: "Distributed Systems".to_string(),
            description: "Consensus and replication".to_string(),
            image_url: Some("https://example.com/ds.png".to_string()),
            capacity: 30,
        };

        let course = insert_course(&pool, req).await.expect("Failed to insert course");
        assert_eq!(course.title, "Distributed Systems");
        assert_eq!(course.capacity, 30);
        assert_eq!(course.available_seats, 30);

        let courses = fetch_courses(&pool).await.expect("Failed to fetch courses");
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].id, course.id);
        assert_eq!(courses[0].available_seats, 30);
    }

    #[tokio::test]
    async fn test_registration_exists_and_roster_join() {
        let pool = setup_test_db().await;

        let course = insert_course(
            &pool,
            NewCourseRequest {
                title: "Compilers".to_string(),
                description: String::new(),
                image_url: None,
                capacity: 10,
            },
        )
        .await
        .expect("Failed to insert course");

        assert!(!registration_exists(&pool, course.id, "a@x.com")
            .await
            .expect("Failed to check registration"));

        sqlx::query(
            "INSERT INTO registrations (id, course_id, student_email, student_name, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind("reg-1")
        .bind(course.id)
        .bind("a@x.com")
        .bind("Ada")
        .bind("2026-01-01T00:00:00Z")
        .execute(&pool)
        .await
        .expect("Failed to insert registration");

        assert!(registration_exists(&pool, course.id, "a@x.com")
            .await
            .expect("Failed to check registration"));

        let roster = fetch_roster(&pool).await.expect("Failed to fetch roster");
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].course_title, "Compilers");
        assert_eq!(roster[0].student_email, "a@x.com");

        let mine = fetch_registrations_for_student(&pool, "a@x.com")
            .await
            .expect("Failed to fetch registrations");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].course_id, course.id);
    }

    #[tokio::test]
    async fn test_fetch_marks_for_student() {
        let pool = setup_test_db().await;

        let course = insert_course(
            &pool,
            NewCourseRequest {
                title: "Databases".to_string(),
                description: String::new(),
                image_url: None,
                capacity: 5,
            },
        )
        .await
        .expect("Failed to insert course");

        sqlx::query(
            "INSERT INTO attendance (course_id, student_email, percentage, isa1, isa2, esa) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(course.id)
        .bind("a@x.com")
        .bind(88i64)
        .bind(20i64)
        .bind(22i64)
        .bind(75i64)
        .execute(&pool)
        .await
        .expect("Failed to insert attendance");

        let marks = fetch_marks_for_student(&pool, "a@x.com")
            .await
            .expect("Failed to fetch marks");
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].course_title, "Databases");
        assert_eq!(marks[0].percentage, 88);
        assert_eq!(marks[0].esa, 75);

        let none = fetch_marks_for_student(&pool, "b@x.com")
            .await
            .expect("Failed to fetch marks");
        assert!(none.is_empty());
    }
}
