use chrono::NaiveTime;
use sqlx::SqlitePool;
use tracing::info;

use crate::db::{semesters, timetable};
use crate::error::AppError;
use crate::models::{NewSlotRequest, TimetableSlot};

use super::{required, required_text};

/// Weekly timetable per semester. Slots are free-text and may overlap.
pub struct TimetableService {
    db: SqlitePool,
}

impl TimetableService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        semester_id: Option<&str>,
        user_id: &str,
    ) -> Result<Vec<TimetableSlot>, AppError> {
        let semester_id = required_text(semester_id, "semesterId")?;
        Ok(timetable::list_for_semester(&self.db, semester_id, user_id).await?)
    }

    pub async fn add_slot(
        &self,
        user_id: &str,
        req: NewSlotRequest,
    ) -> Result<TimetableSlot, AppError> {
        let semester_id = required_text(req.semester_id.as_deref(), "semesterId")?;
        let day_of_week = required(req.day_of_week, "dayOfWeek")?;
        let start_time = parse_time(
            required_text(req.start_time.as_deref(), "startTime")?,
            "startTime",
        )?;
        let end_time = parse_time(required_text(req.end_time.as_deref(), "endTime")?, "endTime")?;
        let course_label = required_text(req.course_label.as_deref(), "courseLabel")?;

        if !(1..=7).contains(&day_of_week) {
            return Err(AppError::BadRequest(
                "dayOfWeek must be between 1 (Monday) and 7 (Sunday)".to_string(),
            ));
        }

        self.ensure_semester(semester_id, user_id).await?;

        let slot = timetable::insert_slot(
            &self.db,
            semester_id,
            day_of_week,
            &start_time,
            &end_time,
            course_label,
        )
        .await?;

        info!("added timetable slot {} to semester {}", slot.id, semester_id);
        Ok(slot)
    }

    pub async fn remove_slot(&self, id: &str, user_id: &str) -> Result<(), AppError> {
        if !timetable::delete_slot(&self.db, id, user_id).await? {
            return Err(AppError::not_found("Timetable slot"));
        }
        Ok(())
    }

    async fn ensure_semester(&self, semester_id: &str, user_id: &str) -> Result<(), AppError> {
        match semesters::find_owned(&self.db, semester_id, user_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("Semester")),
        }
    }
}

/// Accepts `H:MM`, `HH:MM` or `HH:MM:SS` and normalizes to zero-padded `HH:MM`
/// so that slots sort correctly as text.
fn parse_time(raw: &str, field: &str) -> Result<String, AppError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map(|time| time.format("%H:%M").to_string())
        .map_err(|_| AppError::BadRequest(format!("{field} must be a time like 09:30")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_times_to_padded_hours() {
        assert_eq!(parse_time("9:05", "startTime").unwrap(), "09:05");
        assert_eq!(parse_time("13:30:00", "startTime").unwrap(), "13:30");
    }

    #[test]
    fn rejects_non_times() {
        assert!(parse_time("25:00", "endTime").is_err());
        assert!(parse_time("noon", "endTime").is_err());
    }
}
