use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::Course;

/// Sea-ORM Entity for the courses table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Course {
    fn from(model: Model) -> Self {
        Course::restore(
            model.id,
            model.title,
            model.description,
            model.created_at.into(),
        )
    }
}

impl From<&Course> for ActiveModel {
    fn from(course: &Course) -> Self {
        ActiveModel {
            id: Set(course.id()),
            title: Set(course.title().to_string()),
            description: Set(course.description().to_string()),
            created_at: Set(course.created_at().into()),
        }
    }
}
