//! Typed client for the BoilerPlan HTTP API.
//!
//! `PlannerClient` keeps the session token handed out by register/login and
//! attaches it to every later call. `PlannerView` is the local state a UI keeps
//! on top of it.

mod view;

pub use view::{Banner, Form, PlannerView};

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::error::ErrorResponse;
use crate::models::{
    AuthResponse, CatalogFilter, Course, EnrollRequest, Enrollment, GpaSummary, Internship,
    LoginRequest, NewInternshipRequest, NewSemesterRequest, NewSlotRequest, ProfileResponse,
    RegisterRequest, Semester, TimetableSlot, UpdateEnrollmentRequest, UpdateInternshipRequest,
    UpdateProfileRequest, UpdateSemesterRequest, UserProfile,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("Please log in first")]
    NotLoggedIn,
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(err) => err.status(),
            ClientError::NotLoggedIn => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PlannerClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl PlannerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(Client::new(), base_url)
    }

    pub fn with_http(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub async fn health(&self) -> Result<(), ClientError> {
        let response = self.http.get(self.url("/api/health")).send().await?;
        check(response).await.map(drop)
    }

    pub async fn register(&mut self, req: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(req)
            .send()
            .await?;
        let auth: AuthResponse = read(response).await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ClientError> {
        let req = LoginRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        };
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&req)
            .send()
            .await?;
        let auth: AuthResponse = read(response).await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    /// Drops the local token even when the server call fails.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        let request = self.authed(self.http.post(self.url("/api/auth/logout")))?;
        self.token = None;
        expect_empty(request.send().await?).await
    }

    pub async fn profile(&self, user_id: &str) -> Result<ProfileResponse, ClientError> {
        self.get_json(&format!("/api/auth/{user_id}")).await
    }

    pub async fn update_profile(
        &self,
        req: &UpdateProfileRequest,
    ) -> Result<UserProfile, ClientError> {
        self.send_json(self.http.put(self.url("/api/auth/profile")), req).await
    }

    pub async fn semesters(&self) -> Result<Vec<Semester>, ClientError> {
        self.get_json("/api/semesters").await
    }

    pub async fn create_semester(&self, req: &NewSemesterRequest) -> Result<Semester, ClientError> {
        self.send_json(self.http.post(self.url("/api/semesters")), req).await
    }

    pub async fn update_semester(
        &self,
        id: &str,
        req: &UpdateSemesterRequest,
    ) -> Result<Semester, ClientError> {
        self.send_json(self.http.put(self.url(&format!("/api/semesters/{id}"))), req)
            .await
    }

    pub async fn delete_semester(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&format!("/api/semesters/{id}")).await
    }

    pub async fn enrollments(&self) -> Result<Vec<Enrollment>, ClientError> {
        self.get_json("/api/courses").await
    }

    pub async fn semester_enrollments(
        &self,
        semester_id: &str,
    ) -> Result<Vec<Enrollment>, ClientError> {
        self.get_json(&format!("/api/courses/semester/{semester_id}")).await
    }

    pub async fn enrollment(&self, id: &str) -> Result<Enrollment, ClientError> {
        self.get_json(&format!("/api/courses/{id}")).await
    }

    pub async fn enroll(&self, req: &EnrollRequest) -> Result<Enrollment, ClientError> {
        self.send_json(self.http.post(self.url("/api/courses")), req).await
    }

    pub async fn update_enrollment(
        &self,
        id: &str,
        req: &UpdateEnrollmentRequest,
    ) -> Result<Enrollment, ClientError> {
        self.send_json(self.http.put(self.url(&format!("/api/courses/{id}"))), req)
            .await
    }

    pub async fn unenroll(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&format!("/api/courses/{id}")).await
    }

    pub async fn gpa(&self, semester_id: Option<&str>) -> Result<GpaSummary, ClientError> {
        let mut request = self.authed(self.http.get(self.url("/api/courses/gpa")))?;
        if let Some(semester_id) = semester_id {
            request = request.query(&[("semesterId", semester_id)]);
        }
        read(request.send().await?).await
    }

    pub async fn catalog(&self, filter: &CatalogFilter) -> Result<Vec<Course>, ClientError> {
        let response = self
            .http
            .get(self.url("/api/purdue-courses"))
            .query(filter)
            .send()
            .await?;
        read(response).await
    }

    pub async fn catalog_course(&self, code: &str) -> Result<Course, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/api/purdue-courses/{code}")))
            .send()
            .await?;
        read(response).await
    }

    pub async fn internships(&self) -> Result<Vec<Internship>, ClientError> {
        self.get_json("/api/internships").await
    }

    pub async fn create_internship(
        &self,
        req: &NewInternshipRequest,
    ) -> Result<Internship, ClientError> {
        self.send_json(self.http.post(self.url("/api/internships")), req).await
    }

    pub async fn update_internship(
        &self,
        id: &str,
        req: &UpdateInternshipRequest,
    ) -> Result<Internship, ClientError> {
        self.send_json(self.http.put(self.url(&format!("/api/internships/{id}"))), req)
            .await
    }

    pub async fn delete_internship(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&format!("/api/internships/{id}")).await
    }

    pub async fn timetable(&self, semester_id: &str) -> Result<Vec<TimetableSlot>, ClientError> {
        let request = self
            .authed(self.http.get(self.url("/api/timetable")))?
            .query(&[("semesterId", semester_id)]);
        read(request.send().await?).await
    }

    pub async fn add_slot(&self, req: &NewSlotRequest) -> Result<TimetableSlot, ClientError> {
        self.send_json(self.http.post(self.url("/api/timetable")), req).await
    }

    pub async fn remove_slot(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&format!("/api/timetable/{id}")).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotLoggedIn)?;
        Ok(request.bearer_auth(token))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.authed(self.http.get(self.url(path)))?;
        read(request.send().await?).await
    }

    async fn send_json<B, T>(&self, request: RequestBuilder, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authed(request)?.json(body);
        read(request.send().await?).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let request = self.authed(self.http.delete(self.url(path)))?;
        expect_empty(request.send().await?).await
    }
}

async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };
    Err(ClientError::Api { status, message })
}

async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    Ok(check(response).await?.json::<T>().await?)
}

async fn expect_empty(response: Response) -> Result<(), ClientError> {
    check(response).await.map(drop)
}
