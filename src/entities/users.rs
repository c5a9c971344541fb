use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    #[sea_orm(unique)]
    pub email: String,

    /// Argon2id password hash, never the plaintext.
    pub password_hash: String,

    /// True until the account is activated; one-way transition.
    pub inactive: bool,

    /// Present only while activation is pending.
    pub activation_token: Option<String>,

    /// Present only while a password reset is outstanding; single-use.
    pub password_reset_token: Option<String>,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::diaries::Entity")]
    Diaries,
}

impl Related<super::diaries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Diaries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
