//! Phantom parent resolution.
//!
//! A phantom stands in for a parent the legacy never recorded. One phantom is
//! created per distinct key: the unresolved parent id, or, for heroes linked
//! as siblings without a recorded common parent, the smallest hero id of the
//! sibling group.
//!
//! Phantom node ids are `phantom_<id>` and `phantom_siblings_<id>`. When that
//! id is already taken by a hero or an earlier phantom, a `_2`, `_3`, ...
//! suffix is appended until it is free.

use std::collections::{HashMap, HashSet};

use crate::filter::FilteredSet;
use crate::graph::connected_components;
use crate::record::{Bond, Endpoint, Legacy, RelationshipKind};

/// Endpoint of a resolved link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    /// Position in [`Legacy::heroes`]
    Hero(usize),
    /// Index in [`ResolvedGraph::phantoms`]
    Phantom(usize),
}

/// What a phantom stands in for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PhantomKey {
    /// Parent id with no hero record
    Parent(String),
    /// Sibling group, named by its smallest hero id
    Siblings(String),
}

impl PhantomKey {
    fn base_id(&self) -> String {
        match self {
            Self::Parent(id) => format!("phantom_{}", id),
            Self::Siblings(id) => format!("phantom_siblings_{}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhantomNode {
    pub key: PhantomKey,
    /// Node id in the graph model
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
    /// `source` is the parent
    Parent,
    Bond(Bond),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub source: NodeRef,
    pub target: NodeRef,
    pub kind: LinkKind,
}

/// Filtered heroes plus the phantoms and links needed to draw them.
#[derive(Debug, Clone, Default)]
pub struct ResolvedGraph {
    pub heroes: Vec<usize>,
    pub phantoms: Vec<PhantomNode>,
    pub links: Vec<ResolvedLink>,
}

struct PhantomTable<'a> {
    phantoms: Vec<PhantomNode>,
    by_key: HashMap<PhantomKey, usize>,
    /// Phantom ids handed out so far
    taken: HashSet<String>,
    legacy: &'a Legacy,
}

impl<'a> PhantomTable<'a> {
    fn new(legacy: &'a Legacy) -> Self {
        Self {
            phantoms: Vec::new(),
            by_key: HashMap::new(),
            taken: HashSet::new(),
            legacy,
        }
    }

    fn get_or_insert(&mut self, key: PhantomKey) -> usize {
        if let Some(&idx) = self.by_key.get(&key) {
            return idx;
        }
        let id = self.free_id(key.base_id());
        let idx = self.phantoms.len();
        self.taken.insert(id.clone());
        self.by_key.insert(key.clone(), idx);
        self.phantoms.push(PhantomNode { key, id });
        idx
    }

    fn free_id(&self, base: String) -> String {
        let is_taken = |id: &str| self.taken.contains(id) || self.legacy.hero(id).is_some();
        if !is_taken(&base) {
            return base;
        }
        let mut n = 2;
        loop {
            let id = format!("{}_{}", base, n);
            if !is_taken(&id) {
                return id;
            }
            n += 1;
        }
    }
}

/// Resolve the filtered relationships into drawable links.
///
/// With `hide_phantoms`, every link that would need a phantom is dropped and
/// no phantom is created.
pub fn resolve_phantoms(legacy: &Legacy, filtered: &FilteredSet, hide_phantoms: bool) -> ResolvedGraph {
    let mut table = PhantomTable::new(legacy);
    let mut links = Vec::new();
    let mut lone_siblings: Vec<(&str, &str)> = Vec::new();
    let mut hidden = 0usize;

    let hero_ref = |id: &str| legacy.position(id).map(NodeRef::Hero);

    for &idx in &filtered.relationships {
        let rel = &legacy.relationships()[idx];
        match &rel.kind {
            RelationshipKind::Parent => {
                let Some(child) = hero_ref(rel.target.id()) else {
                    continue;
                };
                let source = match &rel.source {
                    Endpoint::Hero(id) => match hero_ref(id) {
                        Some(node) => node,
                        None => continue,
                    },
                    Endpoint::Unresolved(_) if hide_phantoms => {
                        hidden += 1;
                        continue;
                    }
                    Endpoint::Unresolved(id) => {
                        NodeRef::Phantom(table.get_or_insert(PhantomKey::Parent(id.clone())))
                    }
                };
                links.push(ResolvedLink {
                    source,
                    target: child,
                    kind: LinkKind::Parent,
                });
            }
            RelationshipKind::Sibling => {
                let (a, b) = (rel.source.id(), rel.target.id());
                if legacy.share_parent(a, b) {
                    continue;
                }
                if hide_phantoms {
                    hidden += 1;
                    continue;
                }
                lone_siblings.push((a, b));
            }
            RelationshipKind::Bond(bond) => {
                if let (Some(source), Some(target)) = (hero_ref(rel.source.id()), hero_ref(rel.target.id())) {
                    links.push(ResolvedLink {
                        source,
                        target,
                        kind: LinkKind::Bond(bond.clone()),
                    });
                }
            }
        }
    }

    if !lone_siblings.is_empty() {
        let mut members: Vec<usize> = lone_siblings
            .iter()
            .flat_map(|(a, b)| [*a, *b])
            .filter_map(|id| legacy.position(id))
            .collect();
        members.sort_unstable();
        members.dedup();
        let member_ids: Vec<String> = members
            .iter()
            .map(|&pos| legacy.heroes()[pos].id.clone())
            .collect();

        for group in connected_components(&member_ids, lone_siblings.iter().copied()) {
            let Some(smallest) = group.iter().min() else {
                continue;
            };
            let phantom = table.get_or_insert(PhantomKey::Siblings(smallest.clone()));
            for id in &group {
                if let Some(child) = hero_ref(id.as_str()) {
                    links.push(ResolvedLink {
                        source: NodeRef::Phantom(phantom),
                        target: child,
                        kind: LinkKind::Parent,
                    });
                }
            }
        }
    }

    log::debug!(
        "Resolved {} links with {} phantom parents ({} hidden)",
        links.len(),
        table.phantoms.len(),
        hidden
    );

    ResolvedGraph {
        heroes: filtered.heroes.clone(),
        phantoms: table.phantoms,
        links,
    }
}
