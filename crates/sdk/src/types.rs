//! Core types for menu records.
//!
//! These mirror what the CMS exports for a single navigation entry. Wire
//! names follow the CMS columns (`ID`, `menu_item_parent`, `post_name`, ...)
//! so a JSON dump of the menu can be decoded without a translation layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::de;

/// Identifier of a single menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Raw parent value the CMS uses for "no parent".
    pub const NONE: ItemId = ItemId(0);

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Identifier of a whole menu (the container a location points at).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuId(pub u64);

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MenuId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A navigation entry exactly as the CMS produced it.
///
/// Active-state flags are computed upstream and only carried here.
/// `id` and `parent` are optional so a record missing either can be
/// reported instead of defaulting to zero. Fields not listed here are
/// ignored when decoding: CMS exports carry the full post row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMenuItem {
    /// Entry identifier.
    #[serde(
        rename = "ID",
        default,
        deserialize_with = "de::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ItemId>,

    /// Parent entry identifier (`0` = top level).
    #[serde(
        rename = "menu_item_parent",
        default,
        deserialize_with = "de::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent: Option<ItemId>,

    /// Display title.
    #[serde(default, deserialize_with = "de::text")]
    pub title: String,

    /// Slug of the entry post.
    #[serde(rename = "post_name", default, deserialize_with = "de::text")]
    pub slug: String,

    /// Link destination.
    #[serde(default, deserialize_with = "de::text")]
    pub url: String,

    /// Entry points at the page being viewed.
    #[serde(rename = "current", default, deserialize_with = "de::flag")]
    pub active: bool,

    /// Entry is an ancestor of the page being viewed.
    #[serde(rename = "current_item_ancestor", default, deserialize_with = "de::flag")]
    pub active_ancestor: bool,

    /// Entry is the direct parent of the page being viewed.
    #[serde(rename = "current_item_parent", default, deserialize_with = "de::flag")]
    pub active_parent: bool,

    /// CSS classes attached by the CMS and by editors.
    #[serde(default, deserialize_with = "de::class_list")]
    pub classes: Vec<String>,

    /// Free-text `title` attribute.
    #[serde(rename = "attr_title", default, deserialize_with = "de::text")]
    pub attr_title: String,

    #[serde(default, deserialize_with = "de::text")]
    pub description: String,

    /// Link `target` attribute (e.g. `_blank`).
    #[serde(default, deserialize_with = "de::text")]
    pub target: String,

    /// XFN relationship annotation (`rel`).
    #[serde(default, deserialize_with = "de::text")]
    pub xfn: String,
}

impl RawMenuItem {
    /// Create a top-level entry with the given id and title.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: Some(ItemId(id)),
            parent: Some(ItemId::NONE),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Hang the entry under `parent` (`0` = top level).
    pub fn parent(mut self, parent: u64) -> Self {
        self.parent = Some(ItemId(parent));
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn active_ancestor(mut self, active: bool) -> Self {
        self.active_ancestor = active;
        self
    }

    pub fn active_parent(mut self, active: bool) -> Self {
        self.active_parent = active;
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Whether the CMS marked this entry as top level.
    pub fn is_top_level(&self) -> bool {
        matches!(self.parent, Some(ItemId::NONE))
    }
}
