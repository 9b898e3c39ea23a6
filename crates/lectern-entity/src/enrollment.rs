use sea_orm::entity::prelude::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "enrollment_status_enum")]
pub enum Status {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "dropped")]
    Dropped,
}

impl Status {
    /// Dropped enrollments are kept for history but do not count as enrolled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match self {
            Self::Active | Self::InProgress | Self::Completed => true,
            Self::Dropped => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "enrollment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub status: Status,
    pub progress: i16,
    pub version: i32,
    pub enrolled_at: DateTime,
    pub completed_at: Option<DateTime>,
    pub last_accessed: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::user::Entity",
        from = "Column::StudentId",
        to = "crate::user::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "crate::course::Entity",
        from = "Column::CourseId",
        to = "crate::course::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "crate::lesson_completion::Entity")]
    LessonCompletion,
}

impl Related<crate::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<crate::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<crate::lesson_completion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LessonCompletion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
