pub mod course;
pub mod enrollment;
pub mod grade;
pub mod internship;
pub mod semester;
pub mod timetable;
pub mod user;

pub use course::{CatalogFilter, Course, NewCourseRequest};
pub use enrollment::{EnrollRequest, Enrollment, GpaQuery, GpaSummary, UpdateEnrollmentRequest};
pub use grade::{EnrollmentStatus, Grade, UnknownValue};
pub use internship::{Internship, NewInternshipRequest, UpdateInternshipRequest};
pub use semester::{NewSemesterRequest, Semester, SemesterQuery, UpdateSemesterRequest};
pub use timetable::{NewSlotRequest, TimetableQuery, TimetableSlot};
pub use user::{
    AuthResponse, LoginRequest, ProfileResponse, RegisterRequest, UpdateProfileRequest,
    UserProfile,
};
