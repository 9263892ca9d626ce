//! Normalized menu items.
//!
//! A [`NormalizedItem`] is the shape templates consume: renamed fields,
//! plain booleans, a single class string and a `children` branch filled in
//! by the tree builder.

use std::fmt;

use navi_sdk::types::{ItemId, RawMenuItem};
use serde::{Serialize, Serializer};

use super::classes::filter_classes;
use super::tree::Branch;
use crate::error::{NaviError, NaviResult};

/// Where an item hangs in the tree.
///
/// `Root` is kept apart from every `ItemId`, including a real id `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentRef {
    Root,
    Item(ItemId),
}

impl ParentRef {
    /// Interpret a raw CMS parent column, where `0` means top level.
    pub fn from_raw(parent: ItemId) -> Self {
        if parent == ItemId::NONE {
            ParentRef::Root
        } else {
            ParentRef::Item(parent)
        }
    }

    pub fn is_root(self) -> bool {
        matches!(self, ParentRef::Root)
    }

    pub fn item(self) -> Option<ItemId> {
        match self {
            ParentRef::Root => None,
            ParentRef::Item(id) => Some(id),
        }
    }
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentRef::Root => f.write_str("root"),
            ParentRef::Item(id) => write!(f, "{id}"),
        }
    }
}

/// Root serializes as `false`, anything else as its numeric id.
impl Serialize for ParentRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParentRef::Root => serializer.serialize_bool(false),
            ParentRef::Item(id) => serializer.serialize_u64(id.get()),
        }
    }
}

/// A menu entry ready for templates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedItem {
    pub parent: ParentRef,
    pub id: ItemId,
    pub label: String,
    pub slug: String,
    pub url: String,
    pub active: bool,
    pub active_ancestor: bool,
    pub active_parent: bool,
    /// Editor classes, space separated.
    pub classes: String,
    /// `title` attribute.
    pub title: String,
    pub description: String,
    pub target: String,
    pub xfn: String,
    pub children: Branch,
}

impl NormalizedItem {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Project one raw record into its normalized shape.
///
/// `index` is the record's position in the source list and only shows up
/// in the error when `ID` or `menu_item_parent` is missing.
pub fn map_item(index: usize, raw: &RawMenuItem) -> NaviResult<NormalizedItem> {
    let id = raw.id.ok_or(NaviError::InvalidRecord { index, field: "ID" })?;
    let parent = raw.parent.ok_or(NaviError::InvalidRecord {
        index,
        field: "menu_item_parent",
    })?;

    Ok(NormalizedItem {
        parent: ParentRef::from_raw(parent),
        id,
        label: raw.title.clone(),
        slug: raw.slug.clone(),
        url: raw.url.clone(),
        active: raw.active,
        active_ancestor: raw.active_ancestor,
        active_parent: raw.active_parent,
        classes: filter_classes(&raw.classes),
        title: raw.attr_title.clone(),
        description: raw.description.clone(),
        target: raw.target.clone(),
        xfn: raw.xfn.clone(),
        children: Branch::new(),
    })
}
