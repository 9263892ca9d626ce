//! Menu building error types.

use navi_sdk::types::ItemId;
use thiserror::Error;

use crate::menu::ParentRef;

/// Errors raised while normalizing records or assembling a tree.
#[derive(Debug, Error)]
pub enum NaviError {
    #[error("menu record #{index} is missing required field `{field}`")]
    InvalidRecord { index: usize, field: &'static str },

    #[error("menu item id {id} appears more than once")]
    DuplicateId { id: ItemId },

    #[error("menu item {id} is unreachable: parent {parent} is not in the menu")]
    UnreachableItem { id: ItemId, parent: ParentRef },

    #[error("menu item {id} was reached twice while building the tree")]
    CycleDetected { id: ItemId },

    #[error("menu nesting exceeds the maximum depth of {max_depth}")]
    DepthExceeded { max_depth: usize },

    #[error("json error")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using NaviError.
pub type NaviResult<T> = Result<T, NaviError>;
