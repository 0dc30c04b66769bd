use boilerplan::config::Config;
use boilerplan::db;
use boilerplan::error::AppError;
use boilerplan::models::{
    EnrollRequest, EnrollmentStatus, Grade, NewSemesterRequest, RegisterRequest,
    UpdateEnrollmentRequest,
};
use boilerplan::services::{
    AuthService, CatalogService, EnrollmentService, MAX_CREDITS, SemesterService,
};
use sqlx::SqlitePool;

async fn setup() -> (SqlitePool, String) {
    let pool = db::in_memory().await.expect("Failed to create database");
    let user_id = new_user(&pool, "pete@purdue.edu").await;
    (pool, user_id)
}

async fn new_user(pool: &SqlitePool, email: &str) -> String {
    let auth = AuthService::new(pool.clone(), chrono::Duration::hours(1));
    let response = auth
        .register(RegisterRequest {
            email: Some(email.to_string()),
            password: Some("password123".to_string()),
            ..RegisterRequest::default()
        })
        .await
        .expect("Failed to register");
    response.user.id
}

async fn new_semester(pool: &SqlitePool, user_id: &str, term: &str, year: i64) -> String {
    SemesterService::new(pool.clone())
        .create(
            user_id,
            NewSemesterRequest {
                term: Some(term.to_string()),
                year: Some(year),
                ..NewSemesterRequest::default()
            },
        )
        .await
        .expect("Failed to create semester")
        .id
}

fn request(code: &str, credits: i64, semester_id: &str) -> EnrollRequest {
    EnrollRequest {
        code: Some(code.to_string()),
        title: Some(format!("{code} title")),
        credits: Some(credits),
        semester_id: Some(semester_id.to_string()),
        ..EnrollRequest::default()
    }
}

async fn catalog_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM courses")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn enroll_defaults_to_planned_and_not_graded() {
    let (pool, user_id) = setup().await;
    let semester_id = new_semester(&pool, &user_id, "Fall", 2025).await;
    let service = EnrollmentService::new(pool.clone());

    let enrollment = service
        .enroll(&user_id, request("CS 18000", 4, &semester_id))
        .await
        .unwrap();

    assert_eq!(enrollment.code, "CS 18000");
    assert_eq!(enrollment.credits, 4);
    assert_eq!(enrollment.status, EnrollmentStatus::Planned);
    assert_eq!(enrollment.grade, Grade::NotGraded);
    assert_eq!(enrollment.semester_id, semester_id);
}

#[tokio::test]
async fn enrolling_twice_in_one_semester_conflicts() {
    let (pool, user_id) = setup().await;
    let semester_id = new_semester(&pool, &user_id, "Fall", 2025).await;
    let service = EnrollmentService::new(pool.clone());

    service
        .enroll(&user_id, request("MA 16100", 5, &semester_id))
        .await
        .unwrap();
    let err = service
        .enroll(&user_id, request("MA 16100", 5, &semester_id))
        .await
        .unwrap_err();

    match err {
        AppError::Conflict(message) => assert_eq!(message, "Course already added to this semester"),
        other => panic!("expected conflict, got {other:?}"),
    }
    assert_eq!(service.list_for_semester(&semester_id, &user_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn catalog_course_is_shared_across_semesters_and_users() {
    let (pool, user_id) = setup().await;
    let fall = new_semester(&pool, &user_id, "Fall", 2025).await;
    let spring = new_semester(&pool, &user_id, "Spring", 2026).await;
    let other_user = new_user(&pool, "other@purdue.edu").await;
    let other_semester = new_semester(&pool, &other_user, "Fall", 2025).await;
    let service = EnrollmentService::new(pool.clone());

    let first = service.enroll(&user_id, request("CS 25000", 4, &fall)).await.unwrap();
    let second = service.enroll(&user_id, request("CS 25000", 4, &spring)).await.unwrap();
    let third = service
        .enroll(&other_user, request("CS 25000", 4, &other_semester))
        .await
        .unwrap();

    assert_eq!(first.course_id, second.course_id);
    assert_eq!(first.course_id, third.course_id);
    assert_eq!(catalog_count(&pool).await, 1);
}

#[tokio::test]
async fn unenroll_keeps_the_catalog_course() {
    let (pool, user_id) = setup().await;
    let semester_id = new_semester(&pool, &user_id, "Fall", 2025).await;
    let service = EnrollmentService::new(pool.clone());

    let enrollment = service
        .enroll(&user_id, request("PHYS 17200", 4, &semester_id))
        .await
        .unwrap();
    service.unenroll(&enrollment.id, &user_id).await.unwrap();

    assert!(service.list_for_user(&user_id).await.unwrap().is_empty());
    let course = CatalogService::new(pool.clone()).get("PHYS 17200").await.unwrap();
    assert_eq!(course.credits, 4);

    let err = service.unenroll(&enrollment.id, &user_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn update_changes_only_the_given_field() {
    let (pool, user_id) = setup().await;
    let semester_id = new_semester(&pool, &user_id, "Fall", 2025).await;
    let service = EnrollmentService::new(pool.clone());
    let enrollment = service
        .enroll(&user_id, request("CS 18000", 4, &semester_id))
        .await
        .unwrap();

    let updated = service
        .update(
            &enrollment.id,
            &user_id,
            UpdateEnrollmentRequest {
                grade: Some(Grade::AMinus),
                status: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.grade, Grade::AMinus);
    assert_eq!(updated.status, EnrollmentStatus::Planned);

    let updated = service
        .update(
            &enrollment.id,
            &user_id,
            UpdateEnrollmentRequest {
                grade: None,
                status: Some(EnrollmentStatus::Completed),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.grade, Grade::AMinus);
    assert_eq!(updated.status, EnrollmentStatus::Completed);
}

#[tokio::test]
async fn enrollments_of_other_users_are_invisible() {
    let (pool, user_id) = setup().await;
    let semester_id = new_semester(&pool, &user_id, "Fall", 2025).await;
    let intruder = new_user(&pool, "intruder@purdue.edu").await;
    let service = EnrollmentService::new(pool.clone());
    let enrollment = service
        .enroll(&user_id, request("CS 18000", 4, &semester_id))
        .await
        .unwrap();

    let err = service
        .enroll(&intruder, request("CS 24000", 3, &semester_id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = service
        .update(&enrollment.id, &intruder, UpdateEnrollmentRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = service.unenroll(&enrollment.id, &intruder).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert!(service.list_for_semester(&semester_id, &intruder).await.unwrap().is_empty());
    // A rejected enroll must not leave a catalog entry behind.
    assert!(CatalogService::new(pool.clone()).get("CS 24000").await.is_err());
}

#[tokio::test]
async fn enroll_validates_required_fields() {
    let (pool, user_id) = setup().await;
    let semester_id = new_semester(&pool, &user_id, "Fall", 2025).await;
    let service = EnrollmentService::new(pool.clone());

    let mut missing_code = request("CS 18000", 4, &semester_id);
    missing_code.code = Some("   ".to_string());
    assert!(matches!(
        service.enroll(&user_id, missing_code).await,
        Err(AppError::BadRequest(_))
    ));

    let mut missing_semester = request("CS 18000", 4, &semester_id);
    missing_semester.semester_id = None;
    assert!(matches!(
        service.enroll(&user_id, missing_semester).await,
        Err(AppError::BadRequest(_))
    ));

    assert!(matches!(
        service.enroll(&user_id, request("CS 18000", -1, &semester_id)).await,
        Err(AppError::BadRequest(_))
    ));
    assert_eq!(catalog_count(&pool).await, 0);
}

#[tokio::test]
async fn gpa_summary_per_semester_and_overall() {
    let (pool, user_id) = setup().await;
    let fall = new_semester(&pool, &user_id, "Fall", 2025).await;
    let spring = new_semester(&pool, &user_id, "Spring", 2026).await;
    let service = EnrollmentService::new(pool.clone());

    for (code, credits, semester, grade) in [
        ("CS 18000", 3, &fall, Grade::A),
        ("MA 16100", 3, &fall, Grade::B),
        ("CS 24000", 3, &spring, Grade::C),
    ] {
        let mut req = request(code, credits, semester);
        req.grade = Some(grade);
        service.enroll(&user_id, req).await.unwrap();
    }

    let fall_summary = service.gpa_summary(&user_id, Some(&fall)).await.unwrap();
    assert_eq!(fall_summary.gpa, 3.5);
    assert_eq!(fall_summary.total_credits, 6);
    assert_eq!(fall_summary.course_count, 2);

    let overall = service.gpa_summary(&user_id, None).await.unwrap();
    assert_eq!(overall.gpa, 3.0);
    assert_eq!(overall.total_credits, 9);
    assert_eq!(overall.course_count, 3);

    let empty = service.gpa_summary(&user_id, Some("missing")).await.unwrap();
    assert_eq!(empty.gpa, 0.0);
    assert_eq!(empty.course_count, 0);
}

#[tokio::test]
async fn single_enrollment_can_be_fetched_by_its_owner() {
    let (pool, user_id) = setup().await;
    let semester_id = new_semester(&pool, &user_id, "Fall", 2025).await;
    let intruder = new_user(&pool, "intruder@purdue.edu").await;
    let service = EnrollmentService::new(pool.clone());
    let enrollment = service
        .enroll(&user_id, request("CS 18000", 4, &semester_id))
        .await
        .unwrap();

    let fetched = service.get(&enrollment.id, &user_id).await.unwrap();
    assert_eq!(fetched.code, "CS 18000");
    assert_eq!(fetched.semester_id, semester_id);

    let err = service.get(&enrollment.id, &intruder).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn credits_are_bounded() {
    let (pool, user_id) = setup().await;
    let semester_id = new_semester(&pool, &user_id, "Fall", 2025).await;
    let service = EnrollmentService::new(pool.clone());

    for credits in [MAX_CREDITS + 1, i64::MAX] {
        let err = service
            .enroll(&user_id, request("CS 18000", credits, &semester_id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)), "{credits}: {err:?}");
    }

    service
        .enroll(&user_id, request("CS 49000", MAX_CREDITS, &semester_id))
        .await
        .unwrap();
    let summary = service.gpa_summary(&user_id, None).await.unwrap();
    assert_eq!(summary.total_credits, MAX_CREDITS);
    assert_eq!(catalog_count(&pool).await, 1);
}

#[tokio::test]
async fn failed_enrollment_rolls_back_the_new_catalog_course() {
    let (pool, user_id) = setup().await;
    let semester_id = new_semester(&pool, &user_id, "Fall", 2025).await;
    sqlx::query(
        r#"
        CREATE TRIGGER freeze_enrollments BEFORE INSERT ON user_schedule
        BEGIN
            SELECT RAISE(ABORT, 'enrollments are frozen');
        END
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();
    let service = EnrollmentService::new(pool.clone());

    let err = service
        .enroll(&user_id, request("CS 35200", 3, &semester_id))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Database(_)), "{err:?}");
    assert_eq!(catalog_count(&pool).await, 0);
    assert!(matches!(
        CatalogService::new(pool.clone()).get("CS 35200").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_identical_enrolls_yield_one_success() {
    let dir = tempfile::tempdir().expect("temp dir");
    let url = format!("sqlite://{}", dir.path().join("planner.db").display());
    let config = Config::from_lookup(|key| (key == "DATABASE_URL").then(|| url.clone()))
        .expect("config");
    let pool = db::connect_lazy(&config).expect("pool");
    db::migrate(&pool).await.expect("migrate");

    let user_id = new_user(&pool, "pete@purdue.edu").await;
    let semester_id = new_semester(&pool, &user_id, "Fall", 2025).await;

    let mut tasks = Vec::new();
    for _ in 0..5 {
        let service = EnrollmentService::new(pool.clone());
        let req = request("CS 1", 3, &semester_id);
        let user_id = user_id.clone();
        tasks.push(tokio::spawn(async move { service.enroll(&user_id, req).await }));
    }

    let mut ok = 0;
    let mut conflicts = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => ok += 1,
            Err(AppError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(ok, 1);
    assert_eq!(conflicts, 4);
    assert_eq!(catalog_count(&pool).await, 1);
    pool.close().await;
}
