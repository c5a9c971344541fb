//! User-facing message catalog.
//!
//! Every message the API can return lives here so handlers, services and
//! tests agree on the exact wording.

pub const INVALID_NAME_EMPTY: &str = "Name cannot be empty";
pub const INVALID_NAME_LENGTH: &str = "Name must be at least 3 characters long";
pub const INVALID_EMAIL: &str = "The Email provided is invalid, please provide valid email";
pub const INVALID_EMAIL_IN_USE: &str = "The Email provided is already in use";
pub const INVALID_PASSWORD_EMPTY: &str = "Password cannot be empty";
pub const INVALID_PASSWORD_LENGTH: &str = "Password should be at least 8 characters long";
pub const INVALID_PASSWORD_STRUCTURE: &str =
    "Password should contain small letter, Capital letter and a number";

pub const VALID_ACTIVATION_ACCOUNT_SENT: &str = "Account activation link sent to user email";
pub const VALID_ACTIVATION_TOKEN: &str = "The account activated successfully";
pub const INVALID_ACTIVATION_TOKEN: &str = "The activation link is invalid";
pub const INVALID_LOGIN_ACCOUNT_NOT_ACTIVATED: &str =
    "Please activate your account before logging in";

pub const AUTHENTICATION_FAILURE: &str = "Incorrect credentials";
pub const VALIDATION_FAILURE: &str = "Validation failure";
pub const FORBIDDEN: &str = "You are not allowed to perform this operation";
pub const EMAIL_FAILURE: &str = "E-mail failure";
pub const INVALID_JWT_TOKEN: &str = "The session token provided is invalid";
pub const INTERNAL_ERROR: &str = "Unexpected server error";

pub const VALID_PASSWORD_RESET_REQUEST: &str = "Check your e-mail for resetting your password";
pub const INVALID_PASSWORD_RESET_UNKNOWN_MAIL: &str = "E-mail is not recognized";
pub const INVALID_PASSWORD_RESET_TOKEN: &str = "The password reset token is invalid";
pub const PASSWORD_RESET_SUCCESS: &str = "Password updated successfully";

pub const INVALID_NO_DIARY_FOR_USER: &str = "No diary exists for this user";

pub const INVALID_PAGE_DATE_EMPTY: &str = "Date cannot be empty";
pub const INVALID_PAGE_DATE_NOT_DATE: &str = "Date must be a valid calendar date";
pub const INVALID_PAGE_TIME_EMPTY: &str = "Time cannot be empty";
pub const INVALID_PAGE_TIME_NOT_TIME: &str = "Time must be in 24-hour HH:MM format";
pub const INVALID_PAGE_TITLE_EMPTY: &str = "Title cannot be empty";
pub const INVALID_PAGE_TITLE_LENGTH: &str = "Title must be between 3 and 400 characters";
pub const INVALID_PAGE_CONTENT_EMPTY: &str = "Content cannot be empty";
pub const INVALID_PAGE_CONTENT_LENGTH: &str = "Content must be between 3 and 10000 characters";
