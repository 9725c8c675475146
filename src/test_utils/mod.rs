//! Test utilities.
//!
//! - Factories for valid fixtures
//! - In-memory implementations of the repository ports
//! - `TestAppStateBuilder` for HTTP-level tests

mod app_state_builder;
mod auth_mocks;
mod factories;
mod tenant_mocks;

pub use app_state_builder::*;
pub use auth_mocks::*;
pub use factories::*;
pub use tenant_mocks::*;
