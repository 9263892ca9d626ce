#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Navi facade tests against a CMS menu export.

use navi_kernel::config::Config;
use navi_kernel::menu::{BuildOptions, MenuRef, MenuSource, StaticMenuSource, TreeStrategy};
use navi_kernel::{Navi, NaviError};
use navi_sdk::types::{ItemId, MenuId, RawMenuItem};
use navi_test_utils::{assert, menus, test_item};

fn export_source() -> StaticMenuSource {
    StaticMenuSource::from_json(&menus::export().to_string()).unwrap()
}

/// Source with no locations and no menus.
struct EmptySource;

impl MenuSource for EmptySource {
    fn resolve_menu_location(&self, _name: &str) -> Option<MenuId> {
        None
    }

    fn menu_items(&self, _menu: MenuId) -> Vec<RawMenuItem> {
        Vec::new()
    }
}

#[test]
fn test_primary_navigation_from_export() {
    let navi = Navi::build(&export_source(), MenuRef::default(), BuildOptions::default());
    assert_eq!(navi.menu_id(), Some(MenuId(2)));

    let tree = navi.to_tree().unwrap();
    assert_eq!(tree.ids(), vec![ItemId(10), ItemId(20)]);

    let home = tree.get(ItemId(10)).unwrap();
    assert_eq!(home.classes, "menu-item-home");
    assert!(!home.active);

    let services = tree.get(ItemId(20)).unwrap();
    assert_eq!(services.classes, "featured");
    assert_eq!(services.title, "What we do");
    assert!(services.active_ancestor);

    let consulting = services.children.get(ItemId(21)).unwrap();
    assert!(consulting.active);
    assert!(!consulting.active_ancestor);
    assert_eq!(consulting.classes, "current-menu-item");
    assert_eq!(consulting.description, "Strategy work");
    assert_eq!(consulting.target, "_blank");
    assert_eq!(consulting.xfn, "nofollow");
}

#[test]
fn test_other_location_and_menu_id() {
    let source = export_source();

    let footer = Navi::build(&source, "footer_navigation", BuildOptions::default());
    let tree = footer.to_tree().unwrap();
    assert_eq!(tree.ids(), vec![ItemId(40)]);
    assert_eq!(tree.get(ItemId(40)).unwrap().classes, "");

    let by_id = Navi::build(&source, MenuId(3), BuildOptions::default());
    assert_eq!(by_id.to_json().unwrap(), footer.to_json().unwrap());
}

#[test]
fn test_missing_menu_is_empty() {
    let navi = Navi::build(&EmptySource, MenuRef::default(), BuildOptions::default());
    assert!(navi.is_empty());
    assert!(navi.raw().is_empty());
    assert_eq!(navi.to_json().unwrap(), "[]");

    let unassigned = Navi::build(&export_source(), MenuId(99), BuildOptions::default());
    assert!(unassigned.is_empty());
    assert!(unassigned.to_tree().unwrap().is_empty());
}

#[test]
fn test_raw_output_keyed_by_id() {
    let navi = Navi::build(&export_source(), MenuRef::default(), BuildOptions::default());
    let raw = navi.raw();
    let ids: Vec<ItemId> = raw.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![ItemId(10), ItemId(20), ItemId(21)]);

    let json = navi.raw_json(false).unwrap();
    assert::keys_in_order(&json, &["10", "20", "21"]);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["21"]["post_name"], "consulting");
    assert_eq!(value["21"]["current"], true);
}

#[test]
fn test_tree_json_from_export() {
    let navi = Navi::build(&export_source(), MenuRef::default(), BuildOptions::default());
    let json = navi.to_json().unwrap();
    assert::keys_in_order(&json, &["10", "20", "21"]);
    assert::contains(&json, r#""label":"Consulting""#);
    assert::not_contains(&json, "page_item");

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["20"]["children"]["21"]["parent"], 20);
    assert_eq!(value["20"]["parent"], false);
}

#[test]
fn test_lenient_and_strict_policies() {
    let items = vec![
        test_item(1, "Home").build(),
        test_item(2, "No Parent Column").without_parent().build(),
        test_item(3, "Orphan").child_of(77).build(),
        test_item(1, "Home Again").build(),
    ];

    let lenient = Navi::from_items(items.clone(), BuildOptions::default());
    let outcome = lenient.tree_with_report().unwrap();
    assert_eq!(outcome.tree.ids(), vec![ItemId(1)]);
    assert_eq!(outcome.tree.get(ItemId(1)).unwrap().label, "Home");
    assert_eq!(outcome.report.invalid_records, vec![1]);
    assert_eq!(outcome.report.duplicate_ids, vec![ItemId(1)]);
    assert_eq!(outcome.report.unreachable.len(), 1);
    assert!(!outcome.report.is_clean());

    let strict = Navi::from_items(items, BuildOptions::default().strict(true));
    assert!(matches!(
        strict.to_tree().unwrap_err(),
        NaviError::InvalidRecord {
            index: 1,
            field: "menu_item_parent"
        }
    ));
}

#[test]
fn test_strategies_agree_on_export() {
    let source = export_source();
    let scan = Navi::build(
        &source,
        MenuRef::default(),
        BuildOptions::default().strategy(TreeStrategy::Scan),
    );
    let indexed = Navi::build(
        &source,
        MenuRef::default(),
        BuildOptions::default().strategy(TreeStrategy::Indexed),
    );
    assert_eq!(scan.to_tree().unwrap(), indexed.to_tree().unwrap());
}

#[test]
fn test_config_feeds_build_options() {
    let config = Config::from_vars(|key| match key {
        "NAVI_STRATEGY" => Some("scan".to_string()),
        "NAVI_STRICT" => Some("1".to_string()),
        "NAVI_LOCATION" => Some("footer_navigation".to_string()),
        _ => None,
    })
    .unwrap();

    let navi = Navi::build(
        &export_source(),
        MenuRef::location(config.location.clone()),
        config.build_options(),
    );
    assert_eq!(navi.options().strategy, TreeStrategy::Scan);
    assert!(navi.options().strict);
    assert_eq!(navi.to_tree().unwrap().ids(), vec![ItemId(40)]);
}

#[test]
fn test_error_messages() {
    let err = NaviError::InvalidRecord {
        index: 3,
        field: "ID",
    };
    assert_eq!(err.to_string(), "menu record #3 is missing required field `ID`");

    let err = NaviError::DepthExceeded { max_depth: 4 };
    assert::contains(&err.to_string(), "maximum depth of 4");
}
