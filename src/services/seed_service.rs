//! Demo data initialization.
//!
//! Idempotent: each collection is only filled when it is empty, and
//! everything runs in one transaction.

use serde::Serialize;
use std::sync::Arc;

use crate::config::{SEED_TEACHER_EMAIL, SEED_TEACHER_PASSWORD, SEED_TEACHER_USERNAME};
use crate::domain::{NewCourse, NewGrade, NewStudent, NewUser, PasswordHasher};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;
use crate::with_transaction;

const SAMPLE_STUDENTS: [(&str, &str, &str); 4] = [
    ("Test", "User1", "test.user1@student.com"),
    ("Test", "User2", "test.user2@student.com"),
    ("Test", "User3", "test.user3@student.com"),
    ("Test", "User4", "test.user4@student.com"),
];

const SAMPLE_COURSES: [(&str, &str); 4] = [
    ("MATH101", "Calculus I"),
    ("CS101", "Introduction to Computer Science"),
    ("ENG101", "English Composition"),
    ("PHYS101", "Physics I"),
];

/// (student index, course index, grade value)
const SAMPLE_GRADES: [(usize, usize, &str); 4] = [
    (0, 0, "A (93-100)"),
    (0, 1, "B+ (87-89)"),
    (1, 0, "A- (90-92)"),
    (1, 2, "A (93-100)"),
];

/// Rows inserted by one seed run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub users: usize,
    pub students: usize,
    pub courses: usize,
    pub grades: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.users + self.students + self.courses + self.grades == 0
    }
}

/// Inserts the demo teacher, students, courses and grades.
pub struct Seeder<U: UnitOfWork> {
    uow: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<U: UnitOfWork> Seeder<U> {
    pub fn new(uow: Arc<U>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { uow, hasher }
    }

    pub async fn run(&self) -> AppResult<SeedReport> {
        let password_hash = self.hasher.hash(SEED_TEACHER_PASSWORD)?;

        let report = with_transaction!(self.uow, |ctx| {
            let mut report = SeedReport::default();

            let teacher = match ctx.users().find_by_identifier(SEED_TEACHER_USERNAME).await? {
                Some(teacher) => teacher,
                None => {
                    report.users += 1;
                    ctx.users()
                        .create(NewUser::new(
                            SEED_TEACHER_USERNAME.to_string(),
                            SEED_TEACHER_EMAIL.to_string(),
                            password_hash,
                            None,
                        ))
                        .await?
                }
            };

            if ctx.students().count().await? == 0 {
                for (first_name, last_name, email) in SAMPLE_STUDENTS {
                    ctx.students()
                        .create(NewStudent {
                            first_name: first_name.to_string(),
                            last_name: last_name.to_string(),
                            email: email.to_string(),
                        })
                        .await?;
                    report.students += 1;
                }
            }

            if ctx.courses().count().await? == 0 {
                for (code, name) in SAMPLE_COURSES {
                    ctx.courses()
                        .create(NewCourse {
                            code: code.to_string(),
                            name: name.to_string(),
                        })
                        .await?;
                    report.courses += 1;
                }
            }

            if ctx.grades().count().await? == 0 {
                let students = ctx.students().first(2).await?;
                let courses = ctx.courses().first(3).await?;

                if students.len() >= 2 && courses.len() >= 3 {
                    let now = chrono::Utc::now();
                    for (student, course, value) in SAMPLE_GRADES {
                        ctx.grades()
                            .create(NewGrade {
                                student_id: students[student].id,
                                course_id: courses[course].id,
                                grade_value: value.to_string(),
                                date_entered: now,
                                entered_by_teacher_id: teacher.id,
                            })
                            .await?;
                        report.grades += 1;
                    }
                }
            }

            Ok(report)
        })?;

        if report.is_empty() {
            tracing::info!("Seed data already present, nothing inserted");
        } else {
            tracing::info!(
                users = report.users,
                students = report.students,
                courses = report.courses,
                grades = report.grades,
                "Seed data inserted"
            );
        }

        Ok(report)
    }
}
