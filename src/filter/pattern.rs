use std::fmt;

use crate::error::{ChartError, Result};
use crate::record::{Bond, RelationshipStatus};

/// A relationship filter entry: `status` or `status_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipPattern {
    pub status: RelationshipStatus,
    /// `None` matches every type of the status
    pub rel_type: Option<String>,
}

impl RelationshipPattern {
    /// Parse a filter entry, accepting the names players use in game.
    ///
    /// `legacy` means `locked`, `soulmate(s)` means `lover`, and plural
    /// `lovers`/`rivals`/`friends` are singularized.
    pub fn parse(entry: &str) -> Result<Self> {
        let entry = entry.trim();
        if entry.is_empty() {
            return Err(ChartError::InvalidFilter("empty relationship entry".to_string()));
        }

        let (status, rel_type) = match entry.split_once('_') {
            Some((status, rel_type)) => (status, Some(rel_type)),
            None => (entry, None),
        };
        if status.is_empty() {
            return Err(ChartError::InvalidFilter(format!(
                "relationship entry '{}' has no status",
                entry
            )));
        }

        let status = match status {
            "legacy" => RelationshipStatus::Locked,
            other => RelationshipStatus::parse(other),
        };
        let rel_type = rel_type.filter(|t| !t.is_empty()).map(|t| match t {
            "soulmate" | "soulmates" => "lover".to_string(),
            "lovers" | "rivals" | "friends" => t[..t.len() - 1].to_string(),
            other => other.to_string(),
        });

        Ok(Self { status, rel_type })
    }

    pub fn matches(&self, bond: &Bond) -> bool {
        if self.status != bond.status {
            return false;
        }
        match &self.rel_type {
            None => true,
            Some(t) => bond.rel_type.as_deref() == Some(t.as_str()),
        }
    }
}

impl fmt::Display for RelationshipPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rel_type {
            Some(t) => write!(f, "{}_{}", self.status, t),
            None => write!(f, "{}", self.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_status() {
        let p = RelationshipPattern::parse("locked").unwrap();
        assert_eq!(p.status, RelationshipStatus::Locked);
        assert_eq!(p.rel_type, None);
    }

    #[test]
    fn test_parse_aliases() {
        let p = RelationshipPattern::parse("legacy_soulmates").unwrap();
        assert_eq!(p.to_string(), "locked_lover");
        let p = RelationshipPattern::parse("past_rivals").unwrap();
        assert_eq!(p.to_string(), "past_rival");
        let p = RelationshipPattern::parse("broken_").unwrap();
        assert_eq!(p.to_string(), "broken");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(RelationshipPattern::parse("").is_err());
        assert!(RelationshipPattern::parse("_lover").is_err());
    }

    #[test]
    fn test_matches() {
        let lover = Bond::new(RelationshipStatus::Locked, Some("lover"));
        let rival = Bond::new(RelationshipStatus::Past, Some("rival"));
        let locked = RelationshipPattern::parse("locked").unwrap();
        let past_rival = RelationshipPattern::parse("past_rival").unwrap();

        assert!(locked.matches(&lover));
        assert!(!locked.matches(&rival));
        assert!(past_rival.matches(&rival));
        assert!(!past_rival.matches(&lover));
    }
}
