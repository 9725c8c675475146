pub mod admin_user;
pub mod audit_log;
pub mod tenant;
