//! Allow-lists: which response fields an API may return.

use std::{
    collections::{btree_map::Entry, BTreeMap},
    fmt,
    str::FromStr,
};

use crate::error::FieldPathError;

/// A dotted path below a response root, such as `shards.index.shards.min`.
///
/// A `*` segment matches any key at that level.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// The segment that matches every key.
    pub const WILDCARD: &'static str = "*";

    pub fn parse(raw: &str) -> Result<Self, FieldPathError> {
        let segments: Vec<String> = raw.split('.').map(str::to_owned).collect();
        if segments.iter().any(String::is_empty) {
            return Err(FieldPathError {
                path: raw.to_owned(),
            });
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }
}

impl FromStr for FieldPath {
    type Err = FieldPathError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Trie of the field paths allowed under one root.
///
/// A terminal node keeps its whole subtree, so anything inserted below it is
/// redundant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct PathTree {
    terminal: bool,
    children: BTreeMap<String, PathTree>,
}

impl PathTree {
    fn insert(&mut self, path: &FieldPath) {
        let node = path.segments().fold(self, |node, segment| {
            node.children.entry(segment.to_owned()).or_default()
        });
        node.terminal = true;
    }

    pub(crate) fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// The nodes a response key descends into: its exact child and the
    /// wildcard child, whichever exist.
    pub(crate) fn children_for<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a PathTree> + 'a {
        [
            self.children.get(key),
            self.children.get(FieldPath::WILDCARD),
        ]
        .into_iter()
        .flatten()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum RootRule {
    /// Keep the whole root value.
    Whole,
    Paths { paths: Vec<FieldPath>, tree: PathTree },
}

impl RootRule {
    fn from_paths(paths: Vec<FieldPath>) -> Self {
        if paths.is_empty() {
            return RootRule::Whole;
        }
        let mut tree = PathTree::default();
        for path in &paths {
            tree.insert(path);
        }
        RootRule::Paths { paths, tree }
    }

    fn merge(self, other: Self) -> Self {
        match (self, other) {
            (RootRule::Paths { mut paths, .. }, RootRule::Paths { paths: more, .. }) => {
                for path in more {
                    if !paths.contains(&path) {
                        paths.push(path);
                    }
                }
                RootRule::from_paths(paths)
            }
            _ => RootRule::Whole,
        }
    }
}

/// The response fields one API may return, keyed by response root.
///
/// An empty allow-list lets the whole response through. Otherwise only the
/// listed roots survive; a root with no sub-paths is kept whole.
///
/// ```
/// use localuri::AllowList;
///
/// let allow_list = AllowList::new()
///     .allow_root("status")
///     .allow_paths("indices", ["count", "shards.total"])
///     .unwrap();
/// assert_eq!(allow_list.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllowList {
    roots: BTreeMap<String, RootRule>,
}

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the whole value under `root`.
    #[must_use]
    pub fn allow_root(self, root: impl Into<String>) -> Self {
        self.with_rule(root.into(), RootRule::Whole)
    }

    /// Keeps only `paths` below `root`. No paths keeps the whole root.
    ///
    /// Calling this again for the same root adds to its paths.
    pub fn allow_paths<I, S>(self, root: impl Into<String>, paths: I) -> Result<Self, FieldPathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths = paths
            .into_iter()
            .map(|path| FieldPath::parse(path.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.with_rule(root.into(), RootRule::from_paths(paths)))
    }

    fn with_rule(mut self, root: String, rule: RootRule) -> Self {
        match self.roots.entry(root) {
            Entry::Vacant(slot) => {
                slot.insert(rule);
            }
            Entry::Occupied(mut slot) => {
                let previous = std::mem::replace(slot.get_mut(), RootRule::Whole);
                *slot.get_mut() = previous.merge(rule);
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Each root with its sub-paths; an empty slice means the whole root.
    pub fn roots(&self) -> impl Iterator<Item = (&str, &[FieldPath])> {
        self.roots.iter().map(|(root, rule)| {
            let paths: &[FieldPath] = match rule {
                RootRule::Whole => &[],
                RootRule::Paths { paths, .. } => paths,
            };
            (root.as_str(), paths)
        })
    }

    pub(crate) fn rules(&self) -> impl Iterator<Item = (&String, &RootRule)> {
        self.roots.iter()
    }
}
