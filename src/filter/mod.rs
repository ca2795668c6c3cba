//! Filter engine: include/exclude predicates over heroes and relationships.
//!
//! Exclusion always wins over inclusion. A missing include list lets
//! everything through; a missing exclude list removes nothing. Entries that
//! match nothing are reported as warnings, never as errors.

mod lookup;
mod pattern;

pub use lookup::HeroLookup;
pub use pattern::RelationshipPattern;

use std::collections::{BTreeSet, HashSet, VecDeque};

use serde::Deserialize;

use crate::error::{ChartError, Result};
use crate::record::{Bond, Legacy, LegacyBuilder, RelationshipKind};

/// Filter configuration, assembled from CLI flags and the config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FilterParams {
    /// Hero names or ids to keep
    #[serde(default)]
    pub include_heroes: Option<Vec<String>>,
    /// Hero names or ids to drop
    #[serde(default)]
    pub exclude_heroes: Option<Vec<String>>,
    /// `status[_type]` entries to keep
    #[serde(default)]
    pub include_relationships: Option<Vec<String>>,
    /// `status[_type]` entries to drop
    #[serde(default)]
    pub exclude_relationships: Option<Vec<String>>,
    /// Grow included heroes to their lineage and direct bond partners
    #[serde(default)]
    pub include_relatives: bool,
}

/// Heroes and relationships that survived filtering.
#[derive(Debug, Default)]
pub struct FilteredSet {
    /// Positions in [`Legacy::heroes`], ascending
    pub heroes: Vec<usize>,
    /// Indices in [`Legacy::relationships`], ascending
    pub relationships: Vec<usize>,
    /// `UnknownFilterTarget` entries
    pub warnings: Vec<ChartError>,
}

impl FilteredSet {
    pub fn contains_hero(&self, legacy: &Legacy, id: &str) -> bool {
        legacy
            .position(id)
            .map(|pos| self.heroes.binary_search(&pos).is_ok())
            .unwrap_or(false)
    }

    /// Rebuild a standalone legacy holding only the surviving records.
    pub fn subset(&self, legacy: &Legacy) -> Legacy {
        let mut builder = LegacyBuilder::new();
        for &pos in &self.heroes {
            let hero = &legacy.heroes()[pos];
            builder.add_hero(&hero.id, &hero.name, hero.gender, hero.class);
        }
        for &idx in &self.relationships {
            let rel = &legacy.relationships()[idx];
            match &rel.kind {
                RelationshipKind::Parent => builder.add_parent(rel.source.id(), rel.target.id()),
                RelationshipKind::Sibling => builder.add_sibling(rel.source.id(), rel.target.id()),
                RelationshipKind::Bond(bond) => builder.add_bond(
                    rel.source.id(),
                    rel.target.id(),
                    bond.status.clone(),
                    bond.rel_type.as_deref(),
                ),
            }
        }
        builder.build()
    }
}

/// Apply hero and relationship filters to a legacy.
pub fn filter_legacy(legacy: &Legacy, params: &FilterParams) -> Result<FilteredSet> {
    let lookup = HeroLookup::new(legacy);
    let mut warnings = Vec::new();

    let included = resolve_heroes(&lookup, params.include_heroes.as_deref(), &mut warnings)?;
    let excluded = resolve_heroes(&lookup, params.exclude_heroes.as_deref(), &mut warnings)?
        .unwrap_or_default();

    let include_patterns = parse_patterns(legacy, params.include_relationships.as_deref(), &mut warnings)?;
    let exclude_patterns = parse_patterns(legacy, params.exclude_relationships.as_deref(), &mut warnings)?
        .unwrap_or_default();

    let bond_passes = |bond: &Bond| {
        let included = include_patterns
            .as_ref()
            .map(|patterns| patterns.iter().any(|p| p.matches(bond)))
            .unwrap_or(true);
        included && !exclude_patterns.iter().any(|p| p.matches(bond))
    };

    let surviving: BTreeSet<usize> = match included {
        None => (0..legacy.heroes().len())
            .filter(|pos| !excluded.contains(pos))
            .collect(),
        Some(anchors) if params.include_relatives => {
            expand_relatives(legacy, &anchors, &excluded, bond_passes)
        }
        Some(anchors) => anchors.difference(&excluded).copied().collect(),
    };

    let relationships = legacy
        .relationships()
        .iter()
        .enumerate()
        .filter(|(_, rel)| rel.bond().map(bond_passes).unwrap_or(true))
        .filter(|(_, rel)| {
            rel.hero_ids().all(|id| {
                legacy
                    .position(id)
                    .map(|pos| surviving.contains(&pos))
                    .unwrap_or(false)
            })
        })
        .map(|(idx, _)| idx)
        .collect::<Vec<_>>();

    for warning in &warnings {
        log::warn!("{}", warning);
    }
    log::info!(
        "Filtering kept {}/{} heroes and {}/{} relationships",
        surviving.len(),
        legacy.heroes().len(),
        relationships.len(),
        legacy.relationships().len()
    );

    Ok(FilteredSet {
        heroes: surviving.into_iter().collect(),
        relationships,
        warnings,
    })
}

fn resolve_heroes(
    lookup: &HeroLookup<'_>,
    entries: Option<&[String]>,
    warnings: &mut Vec<ChartError>,
) -> Result<Option<BTreeSet<usize>>> {
    let Some(entries) = entries else {
        return Ok(None);
    };
    let mut positions = BTreeSet::new();
    for entry in entries {
        match lookup.resolve(entry)? {
            Some(pos) => {
                positions.insert(pos);
            }
            None => warnings.push(ChartError::UnknownFilterTarget {
                entry: entry.clone(),
            }),
        }
    }
    Ok(Some(positions))
}

fn parse_patterns(
    legacy: &Legacy,
    entries: Option<&[String]>,
    warnings: &mut Vec<ChartError>,
) -> Result<Option<Vec<RelationshipPattern>>> {
    let Some(entries) = entries else {
        return Ok(None);
    };
    let mut patterns = Vec::with_capacity(entries.len());
    for entry in entries {
        let pattern = RelationshipPattern::parse(entry)?;
        let used = legacy
            .relationships()
            .iter()
            .filter_map(|r| r.bond())
            .any(|bond| pattern.matches(bond));
        if !used {
            warnings.push(ChartError::UnknownFilterTarget {
                entry: entry.clone(),
            });
        }
        patterns.push(pattern);
    }
    Ok(Some(patterns))
}

/// Anchors plus their lineage (transitively) and the partners of their bonds
/// that pass the relationship filter. Excluded heroes are never entered, so
/// lineage does not pass through them.
fn expand_relatives(
    legacy: &Legacy,
    anchors: &BTreeSet<usize>,
    excluded: &BTreeSet<usize>,
    bond_passes: impl Fn(&Bond) -> bool,
) -> BTreeSet<usize> {
    let heroes = legacy.heroes();
    let mut visited: HashSet<usize> = HashSet::new();
    let mut queue = VecDeque::new();

    for &pos in anchors.difference(excluded) {
        visited.insert(pos);
        queue.push_back(pos);
    }

    while let Some(pos) = queue.pop_front() {
        for rel in legacy.relationships_of(&heroes[pos]) {
            if rel.bond().is_some() {
                continue;
            }
            for other in rel.hero_ids().filter_map(|id| legacy.position(id)) {
                if excluded.contains(&other) || !visited.insert(other) {
                    continue;
                }
                queue.push_back(other);
            }
        }
    }

    let mut result: BTreeSet<usize> = visited.into_iter().collect();
    for &pos in anchors.difference(excluded) {
        for rel in legacy.relationships_of(&heroes[pos]) {
            if !rel.bond().map(&bond_passes).unwrap_or(false) {
                continue;
            }
            result.extend(
                rel.hero_ids()
                    .filter_map(|id| legacy.position(id))
                    .filter(|other| !excluded.contains(other)),
            );
        }
    }
    result
}
