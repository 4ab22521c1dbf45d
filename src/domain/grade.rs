//! Grade domain entity and its read projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Course, CourseResponse, Student, StudentResponse};

/// Grade domain entity.
///
/// `grade_value` is always a canonical label from the grade scale.
/// `date_entered` and `entered_by_teacher_id` are set once, at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    pub id: i32,
    pub student_id: i32,
    pub course_id: i32,
    pub grade_value: String,
    pub date_entered: DateTime<Utc>,
    pub entered_by_teacher_id: i32,
}

/// Grade creation data, fully resolved by the grade service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGrade {
    pub student_id: i32,
    pub course_id: i32,
    pub grade_value: String,
    pub date_entered: DateTime<Utc>,
    pub entered_by_teacher_id: i32,
}

/// Fields a grade update replaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeChanges {
    pub student_id: i32,
    pub course_id: i32,
    pub grade_value: String,
}

/// A grade joined with one-level summaries of its student and course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeDetails {
    pub grade: Grade,
    pub student: Option<Student>,
    pub course: Option<Course>,
}

/// Grade projection returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub student_id: i32,
    #[schema(example = 1)]
    pub course_id: i32,
    #[schema(example = "B+ (87-89)")]
    pub grade_value: String,
    /// Entry time, ISO-8601 UTC
    pub date_entered: DateTime<Utc>,
    #[schema(example = 1)]
    pub entered_by_teacher_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<StudentResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<CourseResponse>,
}

impl From<GradeDetails> for GradeResponse {
    fn from(details: GradeDetails) -> Self {
        let GradeDetails {
            grade,
            student,
            course,
        } = details;

        Self {
            id: grade.id,
            student_id: grade.student_id,
            course_id: grade.course_id,
            grade_value: grade.grade_value,
            date_entered: grade.date_entered,
            entered_by_teacher_id: grade.entered_by_teacher_id,
            student: student.map(StudentResponse::from),
            course: course.map(CourseResponse::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_is_camel_case_and_acyclic() {
        let details = GradeDetails {
            grade: Grade {
                id: 7,
                student_id: 1,
                course_id: 2,
                grade_value: "B (83-86)".into(),
                date_entered: Utc::now(),
                entered_by_teacher_id: 3,
            },
            student: Some(Student {
                id: 1,
                first_name: "Ann".into(),
                last_name: "Lee".into(),
                email: "ann@x.com".into(),
            }),
            course: None,
        };

        let json = serde_json::to_value(GradeResponse::from(details)).unwrap();
        assert_eq!(json["gradeValue"], "B (83-86)");
        assert_eq!(json["enteredByTeacherId"], 3);
        assert_eq!(json["student"]["firstName"], "Ann");
        assert!(json["student"].get("grades").is_none());
        assert!(json.get("course").is_none());
        assert!(json["dateEntered"].as_str().unwrap().ends_with('Z'));
    }
}
