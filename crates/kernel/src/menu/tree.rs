//! Tree assembly for normalized menu items.
//!
//! Items arrive as a flat list where each entry names its parent. The
//! builder nests every item under its parent's `children`, keeping the
//! relative order of siblings as they appeared in the list.
//!
//! Two strategies produce identical trees:
//! - `Scan` rescans the whole list for every node (O(n²), the reference
//!   behaviour, fine for the tens of entries a site menu has)
//! - `Indexed` buckets items by parent once and then walks the buckets (O(n))

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use navi_sdk::types::ItemId;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, warn};

use super::item::{NormalizedItem, ParentRef};
use crate::error::{NaviError, NaviResult};

/// Ordered set of sibling items keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Branch {
    items: Vec<NormalizedItem>,
    index: HashMap<ItemId, usize>,
}

impl Branch {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, item: NormalizedItem) {
        self.index.insert(item.id, self.items.len());
        self.items.push(item);
    }

    /// Number of direct entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Direct entry with the given id.
    pub fn get(&self, id: ItemId) -> Option<&NormalizedItem> {
        self.index.get(&id).map(|&i| &self.items[i])
    }

    /// Entry with the given id anywhere below this branch.
    pub fn find(&self, id: ItemId) -> Option<&NormalizedItem> {
        if let Some(item) = self.get(id) {
            return Some(item);
        }
        self.items.iter().find_map(|item| item.children.find(id))
    }

    /// Total number of entries in this branch and all nested branches.
    pub fn count(&self) -> usize {
        self.items
            .iter()
            .map(|item| 1 + item.children.count())
            .sum()
    }

    /// Ids of the direct entries, in order.
    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedItem> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<NormalizedItem> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Branch {
    type Item = &'a NormalizedItem;
    type IntoIter = std::slice::Iter<'a, NormalizedItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// JSON object keyed by id, entries in discovery order. An empty branch
/// is `[]` so templates can test it for truthiness.
impl Serialize for Branch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.items.is_empty() {
            return serializer.serialize_seq(Some(0))?.end();
        }
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for item in &self.items {
            map.serialize_entry(&item.id.get(), item)?;
        }
        map.end()
    }
}

/// How the builder discovers children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeStrategy {
    /// Rescan the full list at every level.
    Scan,
    /// Group by parent once, then assemble.
    #[default]
    Indexed,
}

impl FromStr for TreeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scan" => Ok(TreeStrategy::Scan),
            "indexed" | "index" => Ok(TreeStrategy::Indexed),
            other => Err(format!("unknown tree strategy: {other}")),
        }
    }
}

/// Default nesting limit. Site menus rarely go past three levels.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Upper bound for any configured nesting limit. Both strategies recurse
/// once per level, so the limit also bounds stack use.
pub const MAX_DEPTH_LIMIT: usize = 1024;

/// Options for a build pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    pub strategy: TreeStrategy,
    /// Deepest level an item may sit at (top level is 1).
    pub max_depth: usize,
    /// Fail on invalid records, duplicate ids and unreachable items
    /// instead of dropping them.
    pub strict: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            strategy: TreeStrategy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
        }
    }
}

impl BuildOptions {
    pub fn strategy(mut self, strategy: TreeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Clamped to [`MAX_DEPTH_LIMIT`].
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH_LIMIT);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Why an item could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum UnreachableReason {
    /// An ancestor (possibly the direct parent) is not in the list.
    MissingParent { missing: ItemId },
    /// The parent chain loops without reaching the top level.
    Cycle,
}

/// An item left out of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Unreachable {
    pub id: ItemId,
    pub parent: ParentRef,
    pub reason: UnreachableReason,
}

/// What a lenient build dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildReport {
    /// Source positions of records missing `ID` or `menu_item_parent`.
    pub invalid_records: Vec<usize>,
    /// Ids seen more than once; only the first occurrence is kept.
    pub duplicate_ids: Vec<ItemId>,
    /// Items whose parent chain never reaches the requested parent.
    pub unreachable: Vec<Unreachable>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.invalid_records.is_empty()
            && self.duplicate_ids.is_empty()
            && self.unreachable.is_empty()
    }
}

/// Result of a build pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOutcome {
    pub tree: Branch,
    pub report: BuildReport,
}

/// Assembles flat item lists into nested branches.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    options: BuildOptions,
}

impl TreeBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> BuildOptions {
        self.options
    }

    /// Build the top-level menu.
    pub fn build(&self, items: Vec<NormalizedItem>) -> NaviResult<BuildOutcome> {
        self.build_from(items, ParentRef::Root)
    }

    /// Build the branch hanging under `parent`.
    ///
    /// Unreachable items are only reported for root builds; below a real
    /// parent everything outside the subtree is simply not part of it.
    pub fn build_from(
        &self,
        items: Vec<NormalizedItem>,
        parent: ParentRef,
    ) -> NaviResult<BuildOutcome> {
        let mut report = BuildReport::default();
        let items = self.dedup(items, &mut report)?;
        let total = items.len();
        let parents = ids_to_parents(&items);
        let max_depth = self.options.max_depth;

        let mut placed = HashSet::with_capacity(total);
        let tree = match self.options.strategy {
            TreeStrategy::Scan => scan(&items, parent, 1, max_depth, &mut placed)?,
            TreeStrategy::Indexed => {
                let mut groups: HashMap<ParentRef, Vec<usize>> = HashMap::new();
                for (i, item) in items.iter().enumerate() {
                    groups.entry(item.parent).or_default().push(i);
                }
                let ids: Vec<ItemId> = items.iter().map(|item| item.id).collect();
                let mut slots: Vec<Option<NormalizedItem>> = items.into_iter().map(Some).collect();
                let mut walk = Walk {
                    ids: &ids,
                    slots: &mut slots,
                    groups: &groups,
                    max_depth,
                    placed: &mut placed,
                };
                walk.assemble(parent, 1)?
            }
        };

        if parent.is_root() {
            self.collect_unreachable(&parents, &placed, &mut report)?;
        }
        debug!(
            items = total,
            placed = placed.len(),
            strategy = ?self.options.strategy,
            "built menu tree"
        );
        Ok(BuildOutcome { tree, report })
    }

    /// Keep the first item for every id.
    fn dedup(
        &self,
        items: Vec<NormalizedItem>,
        report: &mut BuildReport,
    ) -> NaviResult<Vec<NormalizedItem>> {
        let mut seen = HashSet::with_capacity(items.len());
        let mut kept = Vec::with_capacity(items.len());
        for item in items {
            if seen.insert(item.id) {
                kept.push(item);
                continue;
            }
            if self.options.strict {
                return Err(NaviError::DuplicateId { id: item.id });
            }
            warn!(id = %item.id, label = %item.label, "dropping menu item with duplicate id");
            report.duplicate_ids.push(item.id);
        }
        Ok(kept)
    }

    fn collect_unreachable(
        &self,
        parents: &[(ItemId, ParentRef)],
        placed: &HashSet<ItemId>,
        report: &mut BuildReport,
    ) -> NaviResult<()> {
        let lookup: HashMap<ItemId, ParentRef> = parents.iter().copied().collect();
        for &(id, parent) in parents {
            if placed.contains(&id) {
                continue;
            }
            let Some(reason) = unreachable_reason(id, &lookup) else {
                continue;
            };
            if self.options.strict {
                return Err(NaviError::UnreachableItem { id, parent });
            }
            warn!(id = %id, parent = %parent, ?reason, "menu item is unreachable");
            report.unreachable.push(Unreachable { id, parent, reason });
        }
        Ok(())
    }
}

fn ids_to_parents(items: &[NormalizedItem]) -> Vec<(ItemId, ParentRef)> {
    items.iter().map(|item| (item.id, item.parent)).collect()
}

/// Walk up from `id` until the chain leaves the list or loops.
fn unreachable_reason(id: ItemId, lookup: &HashMap<ItemId, ParentRef>) -> Option<UnreachableReason> {
    let mut seen = HashSet::from([id]);
    let mut current = lookup.get(&id).copied()?;
    loop {
        let parent = current.item()?;
        let Some(&next) = lookup.get(&parent) else {
            return Some(UnreachableReason::MissingParent { missing: parent });
        };
        if !seen.insert(parent) {
            return Some(UnreachableReason::Cycle);
        }
        current = next;
    }
}

fn place(
    id: ItemId,
    depth: usize,
    max_depth: usize,
    placed: &mut HashSet<ItemId>,
) -> NaviResult<()> {
    if depth > max_depth {
        return Err(NaviError::DepthExceeded { max_depth });
    }
    if !placed.insert(id) {
        return Err(NaviError::CycleDetected { id });
    }
    Ok(())
}

/// Reference strategy: every level rescans the complete list.
fn scan(
    items: &[NormalizedItem],
    parent: ParentRef,
    depth: usize,
    max_depth: usize,
    placed: &mut HashSet<ItemId>,
) -> NaviResult<Branch> {
    let mut branch = Branch::new();
    for item in items.iter().filter(|item| item.parent == parent) {
        place(item.id, depth, max_depth, placed)?;
        let children = scan(items, ParentRef::Item(item.id), depth + 1, max_depth, placed)?;
        let mut node = item.clone();
        node.children = children;
        branch.push(node);
    }
    Ok(branch)
}

/// Indexed strategy state: pre-grouped buckets plus the items still unplaced.
struct Walk<'a> {
    ids: &'a [ItemId],
    slots: &'a mut [Option<NormalizedItem>],
    groups: &'a HashMap<ParentRef, Vec<usize>>,
    max_depth: usize,
    placed: &'a mut HashSet<ItemId>,
}

impl Walk<'_> {
    /// Move the children of `parent` out of `slots`, recursively.
    fn assemble(&mut self, parent: ParentRef, depth: usize) -> NaviResult<Branch> {
        let mut branch = Branch::new();
        let groups = self.groups;
        let Some(indices) = groups.get(&parent) else {
            return Ok(branch);
        };
        for &i in indices {
            // Ids are unique here, so an emptied slot means we looped back.
            let Some(mut node) = self.slots[i].take() else {
                return Err(NaviError::CycleDetected { id: self.ids[i] });
            };
            place(node.id, depth, self.max_depth, self.placed)?;
            node.children = self.assemble(ParentRef::Item(node.id), depth + 1)?;
            branch.push(node);
        }
        Ok(branch)
    }
}
