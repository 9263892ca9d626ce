//! CSS class filtering for menu items.
//!
//! The CMS menu walker decorates every entry with its own bookkeeping
//! classes. Those are stripped so only editor-assigned classes reach the
//! templates.

/// Classes generated by the CMS menu walker. Matched as whole tokens.
pub const BLACKLISTED_CLASSES: &[&str] = &[
    "current-menu",
    "current_page",
    "sub-menu",
    "menu-item",
    "menu_item",
    "page-item",
    "page_item",
];

/// Whether `class` is exactly one of the blacklisted tokens.
pub fn is_blacklisted(class: &str) -> bool {
    BLACKLISTED_CLASSES.contains(&class)
}

/// Drop blacklisted and empty tokens, join the rest with single spaces.
pub fn filter_classes<S: AsRef<str>>(classes: &[S]) -> String {
    classes
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|class| !class.is_empty() && !is_blacklisted(class))
        .collect::<Vec<_>>()
        .join(" ")
}
