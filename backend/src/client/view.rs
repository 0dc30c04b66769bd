use crate::gpa::compute_gpa;
use crate::models::{AuthResponse, Enrollment, Semester, UserProfile};

use super::{ClientError, PlannerClient};

/// Which editor is open. At most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Semester,
    Course,
    Internship,
    TimetableSlot,
    Profile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Info(String),
    Error(String),
}

/// Local-only UI state. Nothing here is sent to the server.
#[derive(Debug, Default)]
pub struct PlannerView {
    pub profile: Option<UserProfile>,
    pub semesters: Vec<Semester>,
    pub selected_semester: Option<String>,
    pub open_form: Option<Form>,
    pub banner: Option<Banner>,
    pub enrollments: Vec<Enrollment>,
}

impl PlannerView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_signed_in(&self) -> bool {
        self.profile.is_some()
    }

    /// Takes over the profile and semesters from a register/login response and
    /// selects the most recent semester.
    pub fn signed_in(&mut self, auth: AuthResponse) {
        *self = Self {
            profile: Some(auth.user),
            semesters: auth.semesters.unwrap_or_default(),
            ..Self::default()
        };
        sort_semesters(&mut self.semesters);
        self.selected_semester = self.semesters.first().map(|s| s.id.clone());
    }

    pub fn signed_out(&mut self) {
        *self = Self::default();
    }

    /// Opening the form that is already open closes it.
    pub fn toggle_form(&mut self, form: Form) {
        self.open_form = match self.open_form {
            Some(open) if open == form => None,
            _ => Some(form),
        };
    }

    pub fn close_form(&mut self) {
        self.open_form = None;
    }

    /// Selects a known semester and clears the enrollments of the previous one.
    pub fn select_semester(&mut self, id: &str) -> bool {
        if !self.semesters.iter().any(|s| s.id == id) {
            return false;
        }
        if self.selected_semester.as_deref() != Some(id) {
            self.selected_semester = Some(id.to_string());
            self.enrollments.clear();
        }
        true
    }

    pub fn selected(&self) -> Option<&Semester> {
        let id = self.selected_semester.as_deref()?;
        self.semesters.iter().find(|s| s.id == id)
    }

    pub fn semester_added(&mut self, semester: Semester) {
        let id = semester.id.clone();
        self.semesters.push(semester);
        sort_semesters(&mut self.semesters);
        self.selected_semester = Some(id);
        self.enrollments.clear();
        self.open_form = None;
    }

    pub fn semester_removed(&mut self, id: &str) {
        self.semesters.retain(|s| s.id != id);
        if self.selected_semester.as_deref() == Some(id) {
            self.selected_semester = self.semesters.first().map(|s| s.id.clone());
            self.enrollments.clear();
        }
    }

    pub fn set_enrollments(&mut self, enrollments: Vec<Enrollment>) {
        self.enrollments = enrollments;
    }

    pub fn semester_gpa(&self) -> f64 {
        compute_gpa(self.enrollments.iter().map(|e| (e.grade, e.credits)))
    }

    pub fn total_credits(&self) -> i64 {
        self.enrollments.iter().map(|e| e.credits).sum()
    }

    /// Shows the server's message as is.
    pub fn show_error(&mut self, err: &ClientError) {
        self.banner = Some(Banner::Error(err.to_string()));
    }

    pub fn show_info(&mut self, message: impl Into<String>) {
        self.banner = Some(Banner::Info(message.into()));
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Reloads the enrollments of the selected semester. Failures land in the banner.
    pub async fn refresh_enrollments(&mut self, client: &PlannerClient) {
        let Some(id) = self.selected_semester.clone() else {
            self.enrollments.clear();
            return;
        };
        match client.semester_enrollments(&id).await {
            Ok(rows) => self.enrollments = rows,
            Err(err) => self.show_error(&err),
        }
    }
}

/// Newest year first, then term.
fn sort_semesters(semesters: &mut [Semester]) {
    semesters.sort_by(|a, b| b.year.cmp(&a.year).then_with(|| a.term.cmp(&b.term)));
}
