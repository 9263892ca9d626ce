//! Menu sources.
//!
//! The CMS owns menu storage and the mapping from theme locations
//! (e.g. "primary_navigation") to menus. The kernel only asks a
//! [`MenuSource`] for those two things.

use std::collections::BTreeMap;

use navi_sdk::types::{MenuId, RawMenuItem};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::NaviResult;

/// Location rendered when the caller does not name one.
pub const DEFAULT_LOCATION: &str = "primary_navigation";

/// Collaborator that knows where menus live.
pub trait MenuSource: Send + Sync {
    /// Menu assigned to a named theme location, if any.
    fn resolve_menu_location(&self, name: &str) -> Option<MenuId>;

    /// Items of a menu in display order. Unknown menus yield nothing.
    fn menu_items(&self, menu: MenuId) -> Vec<RawMenuItem>;
}

/// Which menu to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuRef {
    /// A theme location name, resolved through the source.
    Location(String),
    /// A menu id, used as is.
    Id(MenuId),
}

impl MenuRef {
    pub fn location(name: impl Into<String>) -> Self {
        MenuRef::Location(name.into())
    }

    /// Resolve to a menu id. `None` when the location has no menu.
    pub fn resolve(&self, source: &dyn MenuSource) -> Option<MenuId> {
        match self {
            MenuRef::Id(id) => Some(*id),
            MenuRef::Location(name) => {
                let resolved = source.resolve_menu_location(name);
                if resolved.is_none() {
                    debug!(location = %name, "no menu assigned to location");
                }
                resolved
            }
        }
    }
}

impl Default for MenuRef {
    fn default() -> Self {
        MenuRef::Location(DEFAULT_LOCATION.to_string())
    }
}

impl From<MenuId> for MenuRef {
    fn from(id: MenuId) -> Self {
        MenuRef::Id(id)
    }
}

impl From<&str> for MenuRef {
    fn from(name: &str) -> Self {
        MenuRef::Location(name.to_string())
    }
}

/// In-memory source, typically loaded from a JSON export:
///
/// ```json
/// { "locations": { "primary_navigation": 2 }, "menus": { "2": [ ... ] } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticMenuSource {
    #[serde(default)]
    locations: BTreeMap<String, MenuId>,
    #[serde(default)]
    menus: BTreeMap<MenuId, Vec<RawMenuItem>>,
}

impl StaticMenuSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON export.
    pub fn from_json(json: &str) -> NaviResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Assign a menu to a location.
    pub fn with_location(mut self, name: impl Into<String>, menu: MenuId) -> Self {
        self.locations.insert(name.into(), menu);
        self
    }

    /// Add or replace a menu.
    pub fn with_menu(mut self, menu: MenuId, items: Vec<RawMenuItem>) -> Self {
        self.menus.insert(menu, items);
        self
    }

    pub fn locations(&self) -> impl Iterator<Item = (&str, MenuId)> {
        self.locations.iter().map(|(name, id)| (name.as_str(), *id))
    }
}

impl MenuSource for StaticMenuSource {
    fn resolve_menu_location(&self, name: &str) -> Option<MenuId> {
        self.locations.get(name).copied()
    }

    fn menu_items(&self, menu: MenuId) -> Vec<RawMenuItem> {
        self.menus.get(&menu).cloned().unwrap_or_default()
    }
}
