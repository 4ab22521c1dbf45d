//! Grade database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Grade;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub student_id: i32,
    pub course_id: i32,
    pub grade_value: String,
    pub date_entered: DateTimeUtc,
    pub entered_by_teacher_id: i32,
    /// Optimistic concurrency token, bumped on every update
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::EnteredByTeacherId",
        to = "super::user::Column::Id"
    )]
    EnteredBy,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EnteredBy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Grade {
    fn from(model: Model) -> Self {
        Grade {
            id: model.id,
            student_id: model.student_id,
            course_id: model.course_id,
            grade_value: model.grade_value,
            date_entered: model.date_entered,
            entered_by_teacher_id: model.entered_by_teacher_id,
        }
    }
}
