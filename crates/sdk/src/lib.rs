//! Navi SDK
//!
//! Record types handed over by the content management system. The kernel
//! consumes these as read-only input; nothing here knows about trees.

pub mod de;
pub mod types;

pub mod prelude {
    pub use crate::types::*;
}
