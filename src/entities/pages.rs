use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub diary_id: i32,

    /// ISO `YYYY-MM-DD`, validated before insert.
    pub date: String,

    /// 24-hour `HH:MM`, validated before insert.
    pub time: String,

    pub title: String,

    pub content: String,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::diaries::Entity",
        from = "Column::DiaryId",
        to = "super::diaries::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Diaries,
}

impl Related<super::diaries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Diaries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
