//! Grade point average over a set of graded enrollments.

use crate::models::Grade;

/// Credit-weighted GPA, rounded to two decimals.
///
/// Ungraded courses count towards total credits at 0.0 points. Returns 0 when
/// the total credit count is 0.
pub fn compute_gpa<I>(courses: I) -> f64
where
    I: IntoIterator<Item = (Grade, i64)>,
{
    let (weighted, total_credits) = courses
        .into_iter()
        .fold((0.0_f64, 0_i64), |(weighted, total), (grade, credits)| {
            (weighted + grade.points() * credits as f64, total + credits)
        });

    if total_credits == 0 {
        return 0.0;
    }

    round2(weighted / total_credits as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
