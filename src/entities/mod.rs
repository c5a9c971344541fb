pub mod diaries;
pub mod pages;
pub mod users;

pub mod prelude {
    pub use super::diaries::Entity as Diaries;
    pub use super::pages::Entity as Pages;
    pub use super::users::Entity as Users;
}
