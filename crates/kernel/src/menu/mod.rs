//! Navigation menu shaping.
//!
//! Raw CMS menu records go through three steps:
//! - [`map_item`] renames fields and coerces flags per record
//! - [`filter_classes`] strips walker-generated CSS classes
//! - [`TreeBuilder`] nests the flat list by parent id

mod classes;
mod item;
mod source;
mod tree;

pub use classes::{BLACKLISTED_CLASSES, filter_classes, is_blacklisted};
pub use item::{NormalizedItem, ParentRef, map_item};
pub use source::{DEFAULT_LOCATION, MenuRef, MenuSource, StaticMenuSource};
pub use tree::{
    Branch, BuildOptions, BuildOutcome, BuildReport, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT, TreeBuilder,
    TreeStrategy, Unreachable, UnreachableReason,
};
