use std::collections::{HashMap, HashSet};

use super::{
    Bond, Endpoint, Gender, Hero, HeroClass, Legacy, Relationship, RelationshipKind,
    RelationshipStatus,
};

struct PendingLink {
    source: String,
    target: String,
    kind: RelationshipKind,
}

/// Collects heroes and raw links, then resolves them into a [`Legacy`].
///
/// Resolution happens once in [`LegacyBuilder::build`]:
/// - parent ids without a hero record become [`Endpoint::Unresolved`];
/// - sibling and bond links to missing heroes are dropped;
/// - duplicate links collapse, and for bonds of the same type between the
///   same pair only the strongest status survives.
#[derive(Default)]
pub struct LegacyBuilder {
    heroes: Vec<Hero>,
    links: Vec<PendingLink>,
}

impl LegacyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hero(mut self, id: &str, name: &str, gender: Gender, class: HeroClass) -> Self {
        self.add_hero(id, name, gender, class);
        self
    }

    pub fn parent(mut self, parent_id: &str, child_id: &str) -> Self {
        self.add_parent(parent_id, child_id);
        self
    }

    pub fn sibling(mut self, first_id: &str, second_id: &str) -> Self {
        self.add_sibling(first_id, second_id);
        self
    }

    pub fn bond(
        mut self,
        first_id: &str,
        second_id: &str,
        status: RelationshipStatus,
        rel_type: Option<&str>,
    ) -> Self {
        self.add_bond(first_id, second_id, status, rel_type);
        self
    }

    pub fn add_hero(&mut self, id: &str, name: &str, gender: Gender, class: HeroClass) {
        self.heroes.push(Hero {
            id: id.to_string(),
            short_id: Hero::short_id_of(id).to_string(),
            name: name.to_string(),
            gender,
            class,
            relationships: Vec::new(),
        });
    }

    pub fn add_parent(&mut self, parent_id: &str, child_id: &str) {
        self.push_link(parent_id, child_id, RelationshipKind::Parent);
    }

    pub fn add_sibling(&mut self, first_id: &str, second_id: &str) {
        self.push_link(first_id, second_id, RelationshipKind::Sibling);
    }

    pub fn add_bond(
        &mut self,
        first_id: &str,
        second_id: &str,
        status: RelationshipStatus,
        rel_type: Option<&str>,
    ) {
        self.push_link(
            first_id,
            second_id,
            RelationshipKind::Bond(Bond::new(status, rel_type)),
        );
    }

    fn push_link(&mut self, source: &str, target: &str, kind: RelationshipKind) {
        self.links.push(PendingLink {
            source: source.to_string(),
            target: target.to_string(),
            kind,
        });
    }

    pub fn build(self) -> Legacy {
        let mut heroes = Vec::with_capacity(self.heroes.len());
        let mut index = HashMap::new();
        for hero in self.heroes {
            if index.contains_key(&hero.id) {
                log::warn!("Duplicate hero id {}, keeping the first record", hero.id);
                continue;
            }
            index.insert(hero.id.clone(), heroes.len());
            heroes.push(hero);
        }

        let mut relationships: Vec<Relationship> = Vec::new();
        let mut seen: HashSet<(String, String, bool)> = HashSet::new();
        let mut bonds: HashMap<(String, String, Option<String>), usize> = HashMap::new();

        for link in self.links {
            if link.source == link.target {
                log::debug!("Skipping self-link on {}", link.source);
                continue;
            }
            let source_known = index.contains_key(&link.source);
            let target_known = index.contains_key(&link.target);

            match link.kind {
                RelationshipKind::Parent => {
                    if !target_known {
                        log::debug!("Skipping parent link to missing child {}", link.target);
                        continue;
                    }
                    if !seen.insert((link.source.clone(), link.target.clone(), true)) {
                        continue;
                    }
                    let source = if source_known {
                        Endpoint::Hero(link.source)
                    } else {
                        Endpoint::Unresolved(link.source)
                    };
                    relationships.push(Relationship {
                        source,
                        target: Endpoint::Hero(link.target),
                        kind: RelationshipKind::Parent,
                    });
                }
                RelationshipKind::Sibling => {
                    if !source_known || !target_known {
                        log::debug!(
                            "Skipping sibling link {} - {} with a missing hero",
                            link.source,
                            link.target
                        );
                        continue;
                    }
                    let (a, b) = ordered(&link.source, &link.target);
                    if !seen.insert((a, b, false)) {
                        continue;
                    }
                    relationships.push(Relationship {
                        source: Endpoint::Hero(link.source),
                        target: Endpoint::Hero(link.target),
                        kind: RelationshipKind::Sibling,
                    });
                }
                RelationshipKind::Bond(bond) => {
                    if !source_known || !target_known {
                        log::debug!(
                            "Skipping {} bond {} - {} with a missing hero",
                            bond.key(),
                            link.source,
                            link.target
                        );
                        continue;
                    }
                    let (a, b) = ordered(&link.source, &link.target);
                    let key = (a, b, bond.rel_type.clone());
                    if let Some(&existing) = bonds.get(&key) {
                        let current = &mut relationships[existing];
                        let weaker = current
                            .bond()
                            .map(|b| b.status.strength() < bond.status.strength())
                            .unwrap_or(false);
                        if weaker {
                            current.kind = RelationshipKind::Bond(bond);
                        }
                        continue;
                    }
                    bonds.insert(key, relationships.len());
                    relationships.push(Relationship {
                        source: Endpoint::Hero(link.source),
                        target: Endpoint::Hero(link.target),
                        kind: RelationshipKind::Bond(bond),
                    });
                }
            }
        }

        for (rel_idx, rel) in relationships.iter().enumerate() {
            for hero_id in rel.hero_ids() {
                if let Some(&hero_idx) = index.get(hero_id) {
                    heroes[hero_idx].relationships.push(rel_idx);
                }
            }
        }

        log::debug!(
            "Built legacy with {} heroes and {} relationships",
            heroes.len(),
            relationships.len()
        );
        Legacy {
            heroes,
            relationships,
            index,
        }
    }
}

fn ordered(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
