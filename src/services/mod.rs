//! Service layer for business logic
//!
//! Shared between the HTTP API and the management CLI. Every user-scoped
//! operation takes the acting [`CurrentUser`] explicitly.

mod auth_service;
mod dashboard_service;
mod link_service;
mod page_service;
pub mod seeder;
mod user_service;

pub use auth_service::*;
pub use dashboard_service::*;
pub use link_service::*;
pub use page_service::*;
pub use user_service::*;
