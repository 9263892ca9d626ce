//! Navigation menu facade.
//!
//! [`Navi`] loads one menu from a [`MenuSource`] and hands it out either as
//! the raw flat list or as a nested tree ready for templates. A location
//! with no menu behind it gives an empty `Navi`, never an error.

use std::collections::HashSet;

use navi_sdk::types::{ItemId, MenuId, RawMenuItem};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::error::{NaviError, NaviResult};
use crate::menu::{
    Branch, BuildOptions, BuildOutcome, MenuRef, MenuSource, NormalizedItem, TreeBuilder, map_item,
};

/// One loaded menu.
#[derive(Debug, Clone, Default)]
pub struct Navi {
    menu: Option<MenuId>,
    items: Vec<RawMenuItem>,
    options: BuildOptions,
}

impl Navi {
    /// Load the menu `menu` points at.
    pub fn build(source: &dyn MenuSource, menu: impl Into<MenuRef>, options: BuildOptions) -> Self {
        let menu = menu.into();
        let Some(menu_id) = menu.resolve(source) else {
            return Self {
                options,
                ..Self::default()
            };
        };

        let items = source.menu_items(menu_id);
        debug!(menu = %menu_id, items = items.len(), "loaded menu items");
        Self {
            menu: Some(menu_id),
            items,
            options,
        }
    }

    /// Wrap items that were fetched elsewhere.
    pub fn from_items(items: Vec<RawMenuItem>, options: BuildOptions) -> Self {
        Self {
            menu: None,
            items,
            options,
        }
    }

    /// Id of the loaded menu, when it came from a source.
    pub fn menu_id(&self) -> Option<MenuId> {
        self.menu
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The flat item list keyed by id, in source order.
    ///
    /// Records without an id have no key and are left out. For a repeated
    /// id only the first record is kept.
    pub fn raw(&self) -> Vec<(ItemId, &RawMenuItem)> {
        let mut seen = HashSet::with_capacity(self.items.len());
        self.items
            .iter()
            .filter_map(|item| item.id.map(|id| (id, item)))
            .filter(|(id, _)| seen.insert(*id))
            .collect()
    }

    /// Nested menu tree.
    pub fn to_tree(&self) -> NaviResult<Branch> {
        Ok(self.tree_with_report()?.tree)
    }

    /// Nested menu tree plus everything that was dropped on the way.
    pub fn tree_with_report(&self) -> NaviResult<BuildOutcome> {
        let (normalized, invalid) = self.normalize()?;
        let mut outcome = TreeBuilder::new(self.options).build(normalized)?;
        outcome.report.invalid_records = invalid;
        Ok(outcome)
    }

    /// Tree as a JSON object keyed by id.
    pub fn to_json(&self) -> NaviResult<String> {
        Ok(serde_json::to_string(&self.to_tree()?)?)
    }

    pub fn to_json_pretty(&self) -> NaviResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_tree()?)?)
    }

    /// Raw list as a JSON object keyed by id.
    pub fn raw_json(&self, pretty: bool) -> NaviResult<String> {
        let raw = RawView(self.raw());
        let json = if pretty {
            serde_json::to_string_pretty(&raw)?
        } else {
            serde_json::to_string(&raw)?
        };
        Ok(json)
    }

    /// Map every record, setting aside the ones that cannot be mapped.
    fn normalize(&self) -> NaviResult<(Vec<NormalizedItem>, Vec<usize>)> {
        let mut normalized = Vec::with_capacity(self.items.len());
        let mut invalid = Vec::new();

        for (index, raw) in self.items.iter().enumerate() {
            match map_item(index, raw) {
                Ok(item) => normalized.push(item),
                Err(err @ NaviError::InvalidRecord { .. }) if !self.options.strict => {
                    warn!(index, error = %err, "skipping invalid menu record");
                    invalid.push(index);
                }
                Err(err) => return Err(err),
            }
        }

        Ok((normalized, invalid))
    }
}

struct RawView<'a>(Vec<(ItemId, &'a RawMenuItem)>);

impl Serialize for RawView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.is_empty() {
            return serializer.serialize_seq(Some(0))?.end();
        }
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, item) in &self.0 {
            map.serialize_entry(&id.get(), item)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::menu::StaticMenuSource;

    fn source() -> StaticMenuSource {
        StaticMenuSource::new()
            .with_location("primary_navigation", MenuId(2))
            .with_menu(
                MenuId(2),
                vec![
                    RawMenuItem::new(1, "Home").url("/"),
                    RawMenuItem::new(2, "About").url("/about"),
                    RawMenuItem::new(3, "Team").parent(2).url("/about/team"),
                ],
            )
    }

    #[test]
    fn builds_default_location() {
        let navi = Navi::build(&source(), MenuRef::default(), BuildOptions::default());
        assert_eq!(navi.menu_id(), Some(MenuId(2)));
        assert_eq!(navi.len(), 3);

        let tree = navi.to_tree().unwrap();
        assert_eq!(tree.ids(), vec![ItemId(1), ItemId(2)]);
        assert_eq!(tree.get(ItemId(2)).unwrap().children.ids(), vec![ItemId(3)]);
    }

    #[test]
    fn unknown_location_is_empty_not_error() {
        let navi = Navi::build(&source(), "footer", BuildOptions::default());
        assert!(navi.is_empty());
        assert_eq!(navi.menu_id(), None);
        assert!(navi.to_tree().unwrap().is_empty());
        assert_eq!(navi.to_json().unwrap(), "[]");
        assert_eq!(navi.raw_json(false).unwrap(), "[]");
    }

    #[test]
    fn raw_is_keyed_by_id() {
        let navi = Navi::build(&source(), MenuId(2), BuildOptions::default());
        let raw = navi.raw();
        assert_eq!(raw.len(), 3);
        assert_eq!(raw[2].0, ItemId(3));
        assert_eq!(raw[2].1.title, "Team");

        let value: serde_json::Value = serde_json::from_str(&navi.raw_json(false).unwrap()).unwrap();
        assert_eq!(value["3"]["menu_item_parent"], 2);
    }

    #[test]
    fn raw_keeps_first_of_duplicate_ids() {
        let navi = Navi::from_items(
            vec![
                RawMenuItem::new(1, "Home"),
                RawMenuItem::new(2, "About"),
                RawMenuItem::new(1, "Home again"),
            ],
            BuildOptions::default(),
        );

        let raw = navi.raw();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].1.title, "Home");

        let json = navi.raw_json(false).unwrap();
        assert_eq!(json.matches("\"1\":").count(), 1);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["1"]["title"], "Home");
    }

    #[test]
    fn invalid_records_are_skipped_by_default() {
        let mut broken = RawMenuItem::new(9, "Broken");
        broken.parent = None;
        let navi = Navi::from_items(
            vec![RawMenuItem::new(1, "Home"), broken],
            BuildOptions::default(),
        );

        let outcome = navi.tree_with_report().unwrap();
        assert_eq!(outcome.tree.ids(), vec![ItemId(1)]);
        assert_eq!(outcome.report.invalid_records, vec![1]);
    }

    #[test]
    fn invalid_records_fail_strict_builds() {
        let mut broken = RawMenuItem::new(9, "Broken");
        broken.id = None;
        let navi = Navi::from_items(vec![broken], BuildOptions::default().strict(true));

        let err = navi.to_tree().unwrap_err();
        assert!(matches!(err, NaviError::InvalidRecord { index: 0, field: "ID" }));
    }

    #[test]
    fn json_output_shape() {
        let navi = Navi::build(&source(), MenuRef::default(), BuildOptions::default());
        let value: serde_json::Value = serde_json::from_str(&navi.to_json().unwrap()).unwrap();
        assert_eq!(value["2"]["label"], "About");
        assert_eq!(value["2"]["parent"], false);
        assert_eq!(value["2"]["children"]["3"]["url"], "/about/team");
        assert_eq!(value["2"]["children"]["3"]["parent"], 2);
        assert!(navi.to_json_pretty().unwrap().contains('\n'));
    }
}
