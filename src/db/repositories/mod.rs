pub mod diary;
pub mod page;
pub mod user;
