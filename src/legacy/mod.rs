//! Legacy loader: reads a legacy export and maps it onto the record model.
//!
//! Decoding (`envelope`) and typing (`build_legacy`) are separate steps: the
//! raw records never leave this module, only a [`Legacy`] does.

mod aspect;
mod envelope;

pub use aspect::Aspect;
pub use envelope::{extract_heroes, RawHero};

use std::fs::File;
use std::io::Read;
use std::path::Path;

use regex::Regex;
use zip::ZipArchive;

use crate::error::{ChartError, Result};
use crate::record::{Gender, HeroClass, Legacy, LegacyBuilder, RelationshipStatus};

pub const LEGACY_FILE_NAME: &str = "legacy.json";

/// Load a legacy export from disk: `legacy.json` or a `.zip` archive holding it.
pub fn load_legacy(path: &Path) -> Result<Legacy> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    log::info!("Loading legacy from {}", path.display());
    let content = match extension.as_str() {
        "json" => std::fs::read_to_string(path)?,
        "zip" => read_zipped_legacy(path)?,
        _ => {
            return Err(ChartError::UnsupportedInput(format!(
                "{} must be a .json or .zip legacy export",
                path.display()
            )))
        }
    };
    parse_legacy(&content)
}

/// Read `legacy.json` from an archive, or else its first `.json` entry.
fn read_zipped_legacy(path: &Path) -> Result<String> {
    let mut archive = ZipArchive::new(File::open(path)?)?;

    let mut json_names = Vec::new();
    for idx in 0..archive.len() {
        let entry = archive.by_index(idx)?;
        if entry.is_file() && entry.name().to_lowercase().ends_with(".json") {
            json_names.push(entry.name().to_string());
        }
    }

    let name = if json_names.iter().any(|n| n == LEGACY_FILE_NAME) {
        LEGACY_FILE_NAME.to_string()
    } else {
        let first = json_names.into_iter().next().ok_or_else(|| {
            ChartError::UnsupportedInput(format!("No JSON files found in {}", path.display()))
        })?;
        log::warn!(
            "No {} found in {}, reading {} instead",
            LEGACY_FILE_NAME,
            path.display(),
            first
        );
        first
    };

    let mut content = String::new();
    archive.by_name(&name)?.read_to_string(&mut content)?;
    Ok(content)
}

/// Parse legacy JSON text into a [`Legacy`].
pub fn parse_legacy(content: &str) -> Result<Legacy> {
    let root: serde_json::Value = serde_json::from_str(content)?;
    let raw = extract_heroes(&root)?;
    Ok(build_legacy(&raw))
}

/// Map raw hero records onto typed heroes and relationships.
pub fn build_legacy(raw_heroes: &[RawHero]) -> Legacy {
    let past_relationship_re =
        Regex::new(r"^relationship_(.*)_\d+$").expect("Invalid regex pattern");

    let mut builder = LegacyBuilder::new();
    for raw in raw_heroes {
        let gender = raw
            .present_aspects()
            .find_map(|a| Gender::from_aspect(&a.title))
            .unwrap_or(Gender::Unknown);
        let class = raw
            .present_aspects()
            .find_map(|a| HeroClass::from_aspect(&a.title))
            .unwrap_or(HeroClass::Unknown);
        builder.add_hero(&raw.id, &raw.name, gender, class);
    }

    for raw in raw_heroes {
        for aspect in &raw.aspects {
            match aspect.title.as_str() {
                "parentOf" => match aspect.data_at(0) {
                    Some(child) => builder.add_parent(&raw.id, child),
                    None => skip_aspect(&raw.id, aspect),
                },
                "childOf" => match aspect.data_at(0) {
                    Some(parent) => builder.add_parent(parent, &raw.id),
                    None => skip_aspect(&raw.id, aspect),
                },
                "siblingOf" => match aspect.data_at(0) {
                    Some(other) => builder.add_sibling(&raw.id, other),
                    None => skip_aspect(&raw.id, aspect),
                },
                "lockedRelationship" => match (aspect.data_at(0), aspect.data_at(1)) {
                    (Some(rel_type), Some(other)) => builder.add_bond(
                        &raw.id,
                        other,
                        RelationshipStatus::Locked,
                        Some(rel_type),
                    ),
                    _ => skip_aspect(&raw.id, aspect),
                },
                title => {
                    let Some(caps) = past_relationship_re.captures(title) else {
                        continue;
                    };
                    match aspect.data_at(0) {
                        Some(other) => builder.add_bond(
                            &raw.id,
                            other,
                            RelationshipStatus::Past,
                            caps.get(1).map(|m| m.as_str()),
                        ),
                        None => skip_aspect(&raw.id, aspect),
                    }
                }
            }
        }
    }

    builder.build()
}

fn skip_aspect(hero_id: &str, aspect: &Aspect) {
    log::debug!(
        "Hero {} has {} aspect without a target, skipping",
        hero_id,
        aspect.title
    );
}
