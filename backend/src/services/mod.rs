pub mod auth_service;
pub mod catalog_service;
pub mod enrollment_service;
pub mod internship_service;
pub mod semester_service;
pub mod timetable_service;

pub use auth_service::AuthService;
pub use catalog_service::CatalogService;
pub use enrollment_service::EnrollmentService;
pub use internship_service::InternshipService;
pub use semester_service::SemesterService;
pub use timetable_service::TimetableService;

use crate::error::AppError;

/// Upper bound on the credit hours of a single course.
pub const MAX_CREDITS: i64 = 30;

/// Presence check for text fields: absent or blank is a `BadRequest`.
pub(crate) fn required_text<'a>(
    value: Option<&'a str>,
    field: &str,
) -> Result<&'a str, AppError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(AppError::BadRequest(format!("{field} is required"))),
    }
}

/// Text in a partial update: absent stays absent, blank is a `BadRequest`.
pub(crate) fn replacement_text(
    value: Option<&str>,
    field: &str,
) -> Result<Option<String>, AppError> {
    value
        .map(|text| required_text(Some(text), field).map(str::to_string))
        .transpose()
}

pub(crate) fn credit_hours(credits: i64) -> Result<i64, AppError> {
    if !(0..=MAX_CREDITS).contains(&credits) {
        return Err(AppError::BadRequest(format!(
            "credits must be between 0 and {MAX_CREDITS}"
        )));
    }
    Ok(credits)
}

pub(crate) fn required<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::BadRequest(format!("{field} is required")))
}
