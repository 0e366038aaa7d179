//! Linky - short links and link-in-bio pages
//!
//! Users manage short links (`/{slug}` redirects) and pages built from an
//! ordered list of content blocks (`/p/{slug}`). Every change to a page's
//! content goes through an [`content::EditorSession`], which validates each
//! block and only hands out serialized content when the whole list is valid.
//!
//! # Architecture
//! - `content`: content blocks, validation, editor session, slug checks
//! - `storage`: SeaORM storage backend and domain models
//! - `services`: auth, users, links, pages, dashboard, seeding
//! - `api`: HTTP handlers and middleware
//! - `interfaces`: management CLI
//! - `config`: configuration loading
//! - `runtime`: server startup and shutdown
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod content;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
