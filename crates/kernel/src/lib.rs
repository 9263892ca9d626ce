//! Navi Kernel Library
//!
//! Turns the flat, parent-referencing menu items a CMS exports into a
//! nested navigation tree. The `navi` binary wraps this for JSON dumps.

pub mod config;
pub mod error;
pub mod menu;
pub mod navi;

pub use error::{NaviError, NaviResult};
pub use navi::Navi;
