use std::collections::HashMap;

use crate::error::{ChartError, Result};
use crate::record::Legacy;

/// Hero lookup by long id, short id, or display name, built once per legacy.
///
/// Values are positions in [`Legacy::heroes`].
pub struct HeroLookup<'a> {
    legacy: &'a Legacy,
    by_id: HashMap<&'a str, usize>,
    by_short_id: HashMap<&'a str, Vec<usize>>,
    by_name: HashMap<&'a str, Vec<usize>>,
}

impl<'a> HeroLookup<'a> {
    pub fn new(legacy: &'a Legacy) -> Self {
        let mut by_id = HashMap::new();
        let mut by_short_id: HashMap<&str, Vec<usize>> = HashMap::new();
        let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();

        for (pos, hero) in legacy.heroes().iter().enumerate() {
            by_id.insert(hero.id.as_str(), pos);
            by_short_id.entry(hero.short_id.as_str()).or_default().push(pos);
            by_name.entry(hero.name.as_str()).or_default().push(pos);
        }

        Self {
            legacy,
            by_id,
            by_short_id,
            by_name,
        }
    }

    /// Resolve a filter entry to a hero position.
    ///
    /// The entry is checked against long ids, short ids and names together.
    /// Returns `Ok(None)` when nothing matches and `FilterAmbiguity` when the
    /// matches point at more than one hero.
    pub fn resolve(&self, entry: &str) -> Result<Option<usize>> {
        let mut matches: Vec<usize> = self.by_id.get(entry).copied().into_iter().collect();
        for table in [&self.by_short_id, &self.by_name] {
            if let Some(positions) = table.get(entry) {
                matches.extend(positions.iter().copied());
            }
        }
        matches.sort_unstable();
        matches.dedup();

        match matches.as_slice() {
            [] => Ok(None),
            [pos] => Ok(Some(*pos)),
            candidates => Err(ChartError::FilterAmbiguity {
                entry: entry.to_string(),
                candidates: candidates
                    .iter()
                    .map(|&p| self.legacy.heroes()[p].id.clone())
                    .collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Gender, HeroClass};

    fn legacy() -> Legacy {
        Legacy::builder()
            .hero("aaa-111", "Gomez", Gender::Male, HeroClass::Warrior)
            .hero("bbb-222", "Lurch", Gender::Male, HeroClass::Warrior)
            .hero("ccc-333", "Thing", Gender::Unknown, HeroClass::Unknown)
            .hero("ccc-444", "Thing", Gender::Unknown, HeroClass::Unknown)
            .build()
    }

    #[test]
    fn test_resolve_by_each_form() {
        let legacy = legacy();
        let lookup = HeroLookup::new(&legacy);
        assert_eq!(lookup.resolve("aaa-111").unwrap(), Some(0));
        assert_eq!(lookup.resolve("bbb").unwrap(), Some(1));
        assert_eq!(lookup.resolve("Lurch").unwrap(), Some(1));
        assert_eq!(lookup.resolve("ccc-444").unwrap(), Some(3));
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let legacy = legacy();
        let lookup = HeroLookup::new(&legacy);
        assert_eq!(lookup.resolve("gomez").unwrap(), None);
        assert_eq!(lookup.resolve("AAA-111").unwrap(), None);
    }

    #[test]
    fn test_resolve_ambiguous() {
        let legacy = legacy();
        let lookup = HeroLookup::new(&legacy);
        match lookup.resolve("Thing") {
            Err(ChartError::FilterAmbiguity { entry, candidates }) => {
                assert_eq!(entry, "Thing");
                assert_eq!(candidates, vec!["ccc-333", "ccc-444"]);
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }
        assert!(lookup.resolve("ccc").is_err());
    }

    #[test]
    fn test_short_id_and_name_of_different_heroes_is_ambiguous() {
        let legacy = Legacy::builder()
            .hero("Bob-123", "Alice", Gender::Female, HeroClass::Hunter)
            .hero("x-9", "Bob", Gender::Male, HeroClass::Warrior)
            .build();
        let lookup = HeroLookup::new(&legacy);
        match lookup.resolve("Bob") {
            Err(ChartError::FilterAmbiguity { candidates, .. }) => {
                assert_eq!(candidates, vec!["Bob-123", "x-9"]);
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }
    }

    #[test]
    fn test_forms_of_one_hero_agree() {
        let legacy = Legacy::builder()
            .hero("Lurch-1", "Lurch", Gender::Male, HeroClass::Warrior)
            .build();
        let lookup = HeroLookup::new(&legacy);
        assert_eq!(lookup.resolve("Lurch").unwrap(), Some(0));
    }
}
