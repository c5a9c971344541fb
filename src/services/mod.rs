pub mod account_service;
pub mod account_service_impl;
pub mod credentials;
pub mod session;

pub use account_service::{
    AccountError, AccountService, AuthenticatedUser, NewAccount, UserSummary,
};
pub use account_service_impl::SeaOrmAccountService;
