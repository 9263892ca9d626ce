//! Navi test utilities.
//!
//! Helpers for integration testing: menu item fixtures, ready-made menu
//! exports, and assertion utilities for JSON output.

use navi_sdk::types::{ItemId, RawMenuItem};

/// Create a top-level test menu item with default values.
pub fn test_item(id: u64, title: &str) -> TestMenuItem {
    TestMenuItem {
        raw: RawMenuItem {
            id: Some(ItemId(id)),
            parent: Some(ItemId::NONE),
            title: title.to_string(),
            slug: slug_for(title),
            url: format!("https://example.com/{}/", slug_for(title)),
            classes: vec![
                String::new(),
                "menu-item".to_string(),
                "menu-item-type-post_type".to_string(),
            ],
            ..RawMenuItem::default()
        },
    }
}

fn slug_for(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Flat list of bare items from `(id, parent)` pairs; parent `0` is top level.
pub fn flat_items(pairs: &[(u64, u64)]) -> Vec<RawMenuItem> {
    pairs
        .iter()
        .map(|&(id, parent)| test_item(id, &format!("Item {id}")).child_of(parent).build())
        .collect()
}

/// A single chain `1 <- 2 <- ... <- n`, nested `n` levels deep.
pub fn chain(n: u64) -> Vec<RawMenuItem> {
    let pairs: Vec<(u64, u64)> = (1..=n).map(|id| (id, id - 1)).collect();
    flat_items(&pairs)
}

/// A test menu item builder for creating fixtures.
#[derive(Debug, Clone)]
pub struct TestMenuItem {
    pub raw: RawMenuItem,
}

impl TestMenuItem {
    /// Hang the item under `parent` (`0` = top level).
    pub fn child_of(mut self, parent: u64) -> Self {
        self.raw.parent = Some(ItemId(parent));
        self
    }

    /// Mark as the current page.
    pub fn current(mut self) -> Self {
        self.raw.active = true;
        self.raw.classes.push("current-menu-item".to_string());
        self
    }

    /// Mark as an ancestor of the current page.
    pub fn current_ancestor(mut self) -> Self {
        self.raw.active_ancestor = true;
        self.raw.classes.push("current-menu-ancestor".to_string());
        self
    }

    /// Mark as the parent of the current page.
    pub fn current_parent(mut self) -> Self {
        self.raw.active_parent = true;
        self.raw.classes.push("current-menu-parent".to_string());
        self
    }

    /// Add a class.
    pub fn with_class(mut self, class: &str) -> Self {
        self.raw.classes.push(class.to_string());
        self
    }

    /// Replace all classes.
    pub fn with_classes(mut self, classes: &[&str]) -> Self {
        self.raw.classes = classes.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Open in a new window.
    pub fn new_window(mut self) -> Self {
        self.raw.target = "_blank".to_string();
        self
    }

    /// Drop the id, producing an invalid record.
    pub fn without_id(mut self) -> Self {
        self.raw.id = None;
        self
    }

    /// Drop the parent column, producing an invalid record.
    pub fn without_parent(mut self) -> Self {
        self.raw.parent = None;
        self
    }

    pub fn build(self) -> RawMenuItem {
        self.raw
    }
}

/// Assertion helpers for JSON output.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that object keys appear in the given order in serialized JSON.
    ///
    /// Works on the text: a parsed `Value` sorts its keys.
    pub fn keys_in_order(json: &str, expected: &[&str]) {
        let mut last = 0;
        for key in expected {
            let needle = format!("\"{key}\":");
            let Some(pos) = json[last..].find(&needle) else {
                panic!("Expected key '{key}' after offset {last} in: {json}");
            };
            last += pos + needle.len();
        }
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{needle}'\nActual: {haystack}"
        );
    }
}

/// Menu export fixtures.
pub mod menus {
    use navi_sdk::types::RawMenuItem;
    use serde_json::json;

    use super::test_item;

    /// A typical primary navigation viewed from the "Team" page.
    ///
    /// ```text
    /// 10 Home
    /// 20 About            (current ancestor, current parent)
    ///    21 Team          (current)
    ///    22 History
    ///       23 Founders
    /// 30 Contact          (opens in new window)
    /// ```
    pub fn primary() -> Vec<RawMenuItem> {
        vec![
            test_item(10, "Home").with_class("home-link").build(),
            test_item(20, "About")
                .current_ancestor()
                .current_parent()
                .with_class("has-dropdown")
                .build(),
            test_item(21, "Team").child_of(20).current().build(),
            test_item(22, "History").child_of(20).build(),
            test_item(23, "Founders").child_of(22).build(),
            test_item(30, "Contact").new_window().build(),
        ]
    }

    /// A `{locations, menus}` export as the CMS dumps it, stringly typed.
    pub fn export() -> serde_json::Value {
        json!({
            "locations": {
                "primary_navigation": 2,
                "footer_navigation": 3
            },
            "menus": {
                "2": [
                    {
                        "ID": 10, "menu_item_parent": "0", "title": "Home",
                        "post_name": "home", "url": "https://example.com/",
                        "current": "", "current_item_ancestor": "", "current_item_parent": "",
                        "classes": ["", "menu-item", "menu-item-home"],
                        "attr_title": "", "description": "", "target": "", "xfn": "",
                        "post_status": "publish", "menu_order": 1
                    },
                    {
                        "ID": "20", "menu_item_parent": "0", "title": "Services",
                        "post_name": "services", "url": "https://example.com/services/",
                        "current": false, "current_item_ancestor": true, "current_item_parent": true,
                        "classes": ["menu-item", "page_item", "featured"],
                        "attr_title": "What we do", "description": "", "target": "", "xfn": "",
                        "menu_order": 2
                    },
                    {
                        "ID": 21, "menu_item_parent": "20", "title": "Consulting",
                        "post_name": "consulting", "url": "https://example.com/services/consulting/",
                        "current": 1, "current_item_ancestor": 0, "current_item_parent": 0,
                        "classes": "menu-item current-menu-item",
                        "attr_title": "", "description": "Strategy work", "target": "_blank", "xfn": "nofollow",
                        "menu_order": 3
                    }
                ],
                "3": [
                    {
                        "ID": 40, "menu_item_parent": 0, "title": "Privacy",
                        "post_name": "privacy", "url": "https://example.com/privacy/",
                        "classes": null
                    }
                ]
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_item_builder() {
        let item = test_item(5, "Our Work")
            .child_of(2)
            .current()
            .new_window()
            .build();

        assert_eq!(item.id, Some(ItemId(5)));
        assert_eq!(item.parent, Some(ItemId(2)));
        assert_eq!(item.slug, "our-work");
        assert!(item.active);
        assert_eq!(item.target, "_blank");
        assert!(item.classes.contains(&"current-menu-item".to_string()));
    }

    #[test]
    fn test_invalid_builders() {
        assert_eq!(test_item(1, "A").without_id().build().id, None);
        assert_eq!(test_item(1, "A").without_parent().build().parent, None);
    }

    #[test]
    fn test_flat_and_chain() {
        let items = flat_items(&[(1, 0), (2, 1)]);
        assert_eq!(items[1].parent, Some(ItemId(1)));

        let deep = chain(4);
        assert_eq!(deep.len(), 4);
        assert_eq!(deep[0].parent, Some(ItemId::NONE));
        assert_eq!(deep[3].parent, Some(ItemId(3)));
    }

    #[test]
    fn test_assertions() {
        let json = serde_json::json!({"b": 1, "a": 2});
        assert::has_key(&json, "a");
        assert::keys_in_order(r#"{"b":1,"a":{"c":2}}"#, &["b", "a", "c"]);
        assert::contains("hello world", "world");
        assert::not_contains("hello world", "foo");
    }

    #[test]
    fn test_fixtures_decode() {
        assert_eq!(menus::primary().len(), 6);
        let export = menus::export();
        let items: Vec<RawMenuItem> =
            serde_json::from_value(export["menus"]["2"].clone()).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].id, Some(ItemId(20)));
    }
}
