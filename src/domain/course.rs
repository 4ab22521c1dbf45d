//! Course domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Course domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: i32,
    pub code: String,
    pub name: String,
}

/// Course creation data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub code: String,
    pub name: String,
}

/// Course projection returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "CS101")]
    pub code: String,
    #[schema(example = "Intro CS")]
    pub name: String,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            code: course.code,
            name: course.name,
        }
    }
}
