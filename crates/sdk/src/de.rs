//! Lenient decoders for loosely typed CMS exports.
//!
//! CMS rows come from a database layer that stringifies most columns:
//! identifiers show up as `42` or `"42"`, flags as `true`, `1`, `"1"` or
//! `""`, and optional columns as `null`. These functions are used through
//! `#[serde(deserialize_with = ...)]` on [`RawMenuItem`](crate::types::RawMenuItem).

use serde::de::Error;
use serde::{Deserialize, Deserializer};

use crate::types::ItemId;

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseId {
    Number(u64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseFlag {
    Bool(bool),
    Number(i64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseText {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseClasses {
    List(Vec<Option<String>>),
    Text(String),
}

/// Identifier given as a number or a numeric string. Blank or `null` is `None`.
pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<ItemId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LooseId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(LooseId::Number(n)) => Ok(Some(ItemId(n))),
        Some(LooseId::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<u64>()
                .map(|n| Some(ItemId(n)))
                .map_err(|_| D::Error::custom(format!("invalid menu item id: {s:?}")))
        }
    }
}

/// Truthiness the way the CMS stores it. `null` is `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseFlag>::deserialize(deserializer)? {
        None => false,
        Some(LooseFlag::Bool(b)) => b,
        Some(LooseFlag::Number(n)) => n != 0,
        Some(LooseFlag::Text(s)) => !matches!(s.trim(), "" | "0" | "false"),
    })
}

/// Free text; `null` becomes empty and scalars are stringified.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseText>::deserialize(deserializer)? {
        None => String::new(),
        Some(LooseText::Text(s)) => s,
        Some(LooseText::Number(n)) => n.to_string(),
        Some(LooseText::Bool(b)) => String::from(if b { "1" } else { "" }),
    })
}

/// Class list given as an array or a single space-separated string.
pub fn class_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseClasses>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(LooseClasses::List(list)) => list.into_iter().map(Option::unwrap_or_default).collect(),
        Some(LooseClasses::Text(s)) => s.split_whitespace().map(str::to_string).collect(),
    })
}
