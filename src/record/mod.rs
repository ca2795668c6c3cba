//! Record model: typed heroes and relationships of one legacy.
//!
//! Heroes and relationships are created once, through [`LegacyBuilder`], and
//! never change afterwards. The [`Legacy`] owns every relationship; heroes only
//! keep indices into that list.

mod builder;

pub use builder::LegacyBuilder;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// Hero gender as recorded by present aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Nonbinary,
    Unknown,
}

impl Gender {
    /// Map an aspect title onto a gender, if it is one.
    pub fn from_aspect(title: &str) -> Option<Self> {
        match title {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "nonbinary" => Some(Self::Nonbinary),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Nonbinary => "nonbinary",
            Self::Unknown => "unknown",
        }
    }
}

/// Hero class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroClass {
    Warrior,
    Hunter,
    Mystic,
    Unknown,
}

impl HeroClass {
    /// Map an aspect title onto a class, if it is one.
    pub fn from_aspect(title: &str) -> Option<Self> {
        match title {
            "warrior" => Some(Self::Warrior),
            "hunter" => Some(Self::Hunter),
            "mystic" => Some(Self::Mystic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warrior => "warrior",
            Self::Hunter => "hunter",
            Self::Mystic => "mystic",
            Self::Unknown => "unknown",
        }
    }
}

/// Status of a bond. Open-ended: anything besides `locked` and `past` is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelationshipStatus {
    Locked,
    Past,
    Other(String),
}

impl RelationshipStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "locked" => Self::Locked,
            "past" => Self::Past,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Locked => "locked",
            Self::Past => "past",
            Self::Other(s) => s,
        }
    }

    /// Higher wins when the same pair has several bonds of one type.
    pub(crate) fn strength(&self) -> u8 {
        match self {
            Self::Locked => 2,
            Self::Past => 1,
            Self::Other(_) => 0,
        }
    }
}

impl fmt::Display for RelationshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A symmetric emotional link between two heroes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bond {
    pub status: RelationshipStatus,
    pub rel_type: Option<String>,
}

impl Bond {
    pub fn new(status: RelationshipStatus, rel_type: Option<&str>) -> Self {
        Self {
            status,
            rel_type: rel_type.filter(|t| !t.is_empty()).map(str::to_string),
        }
    }

    /// `status` or `status_type`, the same form filter entries use.
    pub fn key(&self) -> String {
        match &self.rel_type {
            Some(t) => format!("{}_{}", self.status, t),
            None => self.status.to_string(),
        }
    }
}

/// One side of a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Long id of a hero present in the legacy
    Hero(String),
    /// Parent id with no hero record
    Unresolved(String),
}

impl Endpoint {
    pub fn hero_id(&self) -> Option<&str> {
        match self {
            Self::Hero(id) => Some(id),
            Self::Unresolved(_) => None,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Hero(id) | Self::Unresolved(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    /// `source` is the parent, `target` the child
    Parent,
    Sibling,
    Bond(Bond),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relationship {
    pub source: Endpoint,
    pub target: Endpoint,
    pub kind: RelationshipKind,
}

impl Relationship {
    pub fn bond(&self) -> Option<&Bond> {
        match &self.kind {
            RelationshipKind::Bond(b) => Some(b),
            _ => None,
        }
    }

    /// Ids of the endpoints that are real heroes.
    pub fn hero_ids(&self) -> impl Iterator<Item = &str> {
        self.source.hero_id().into_iter().chain(self.target.hero_id())
    }
}

/// A character of the legacy.
#[derive(Debug, Clone, Serialize)]
pub struct Hero {
    pub id: String,
    pub short_id: String,
    pub name: String,
    pub gender: Gender,
    pub class: HeroClass,
    /// Indices into [`Legacy::relationships`]
    #[serde(skip)]
    pub relationships: Vec<usize>,
}

impl Hero {
    pub fn short_id_of(id: &str) -> &str {
        id.split_once('-').map(|(short, _)| short).unwrap_or(id)
    }
}

/// Every hero and relationship of one legacy export.
#[derive(Debug, Clone, Default)]
pub struct Legacy {
    heroes: Vec<Hero>,
    relationships: Vec<Relationship>,
    index: HashMap<String, usize>,
}

impl Legacy {
    pub fn builder() -> LegacyBuilder {
        LegacyBuilder::new()
    }

    pub fn heroes(&self) -> &[Hero] {
        &self.heroes
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn hero(&self, id: &str) -> Option<&Hero> {
        self.index.get(id).map(|&idx| &self.heroes[idx])
    }

    /// Position of the hero in [`Legacy::heroes`]; the order heroes were loaded in.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn relationships_of<'a>(&'a self, hero: &'a Hero) -> impl Iterator<Item = &'a Relationship> {
        hero.relationships.iter().map(move |&idx| &self.relationships[idx])
    }

    /// Parent endpoints of a hero, known or not, in relationship order.
    pub fn parents(&self, child_id: &str) -> Vec<&Endpoint> {
        let Some(child) = self.hero(child_id) else {
            return Vec::new();
        };
        self.relationships_of(child)
            .filter(|r| r.kind == RelationshipKind::Parent && r.target.id() == child_id)
            .map(|r| &r.source)
            .collect()
    }

    /// Known parent ids of a hero, in relationship order.
    pub fn known_parents(&self, child_id: &str) -> Vec<&str> {
        self.parents(child_id)
            .into_iter()
            .filter_map(Endpoint::hero_id)
            .collect()
    }

    /// True when both heroes have at least one parent in common, known or not.
    pub fn share_parent(&self, a: &str, b: &str) -> bool {
        let parents_a = self.parents(a);
        self.parents(b).iter().any(|p| parents_a.contains(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        assert_eq!(Hero::short_id_of("abc123-def-456"), "abc123");
        assert_eq!(Hero::short_id_of("plain"), "plain");
    }

    #[test]
    fn test_bond_key() {
        let bond = Bond::new(RelationshipStatus::Locked, Some("lover"));
        assert_eq!(bond.key(), "locked_lover");
        let bare = Bond::new(RelationshipStatus::Past, Some(""));
        assert_eq!(bare.key(), "past");
        assert_eq!(bare.rel_type, None);
    }

    #[test]
    fn test_status_parse_open_ended() {
        assert_eq!(RelationshipStatus::parse("locked"), RelationshipStatus::Locked);
        assert_eq!(RelationshipStatus::parse("past"), RelationshipStatus::Past);
        assert_eq!(
            RelationshipStatus::parse("broken"),
            RelationshipStatus::Other("broken".to_string())
        );
        assert!(RelationshipStatus::Locked.strength() > RelationshipStatus::Past.strength());
    }

    #[test]
    fn test_aspect_mapping() {
        assert_eq!(Gender::from_aspect("female"), Some(Gender::Female));
        assert_eq!(Gender::from_aspect("warrior"), None);
        assert_eq!(HeroClass::from_aspect("mystic"), Some(HeroClass::Mystic));
        assert_eq!(HeroClass::from_aspect("male"), None);
    }

    #[test]
    fn test_known_parents_and_shared() {
        let legacy = Legacy::builder()
            .hero("p-1", "Morticia", Gender::Female, HeroClass::Mystic)
            .hero("c-1", "Wednesday", Gender::Female, HeroClass::Hunter)
            .hero("c-2", "Pugsley", Gender::Male, HeroClass::Warrior)
            .hero("c-3", "Cousin", Gender::Unknown, HeroClass::Unknown)
            .hero("c-4", "Other", Gender::Unknown, HeroClass::Unknown)
            .parent("p-1", "c-1")
            .parent("p-1", "c-2")
            .parent("ghost", "c-3")
            .parent("ghost", "c-4")
            .build();

        assert_eq!(legacy.known_parents("c-1"), vec!["p-1"]);
        assert!(legacy.known_parents("c-3").is_empty());
        assert_eq!(legacy.parents("c-3").len(), 1);
        assert!(legacy.share_parent("c-1", "c-2"));
        assert!(legacy.share_parent("c-3", "c-4"));
        assert!(!legacy.share_parent("c-1", "c-3"));
        assert!(legacy.parents("missing").is_empty());
    }
}
