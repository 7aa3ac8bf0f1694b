pub mod attendance;
pub mod course;
pub mod registration;

pub use attendance::{Attendance, StudentMarks};
pub use course::{Course, NewCourseRequest};
pub use registration::{DropRequest, EnrollRequest, Registration, RosterEntry};
