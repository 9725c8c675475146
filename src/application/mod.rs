pub mod app_error;
pub mod helpers;
pub mod jwt;
pub mod slug;
pub mod use_cases;
pub mod validators;
