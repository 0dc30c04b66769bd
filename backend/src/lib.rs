//! BoilerPlan: a student academic-planning service.
//!
//! Users keep semesters, course enrollments, internships and a weekly
//! timetable. The `api` module serves them as JSON over HTTP on top of the
//! SQLite repositories in `db`; `client` talks to that API.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod gpa;
pub mod models;
pub mod password;
pub mod services;
pub mod state;
