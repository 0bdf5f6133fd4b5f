//! Core of the promogen event-site tools.
//!
//! - `event`, `slug`, `validate`: the `meta.json` record and its field rules
//! - `folder`: creating `events/<date>-<slug>/` folders
//! - `index`: rebuilding `events/index.json`
//! - `project`, `config`: locating the site repository and loading settings
//! - `tools`, `publish`: the git/GitHub pull-request flow

pub mod config;
pub mod error;
pub mod event;
pub mod folder;
pub mod index;
pub mod json;
pub mod project;
pub mod publish;
pub mod slug;
pub mod tools;
pub mod validate;

pub use error::{PromoError, PromoResult};
