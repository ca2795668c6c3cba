//! Decoding of the legacy JSON envelope into raw hero records.

use serde_json::{Map, Value as JsonValue};

use super::Aspect;
use crate::error::{ChartError, Result};

/// One hero as read from the export, before any typing.
#[derive(Debug, Clone)]
pub struct RawHero {
    pub id: String,
    pub name: String,
    /// Present aspects first, then legacy aspects, then past aspects from older snapshots
    pub aspects: Vec<Aspect>,
}

impl RawHero {
    pub fn present_aspects(&self) -> impl Iterator<Item = &Aspect> {
        self.aspects.iter().filter(|a| !a.is_past)
    }
}

/// Extract every individual from a parsed legacy document.
pub fn extract_heroes(root: &JsonValue) -> Result<Vec<RawHero>> {
    let entries = root
        .get("entries")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| ChartError::Parse("Legacy has no entries list".to_string()))?;

    let mut heroes = Vec::new();
    for entry in entries {
        let entry_id = entry
            .pointer("/id/value")
            .and_then(JsonValue::as_str)
            .unwrap_or("<no id>");
        let entry_type = entry.get("type").and_then(JsonValue::as_str).unwrap_or("");
        if entry_type != "INDIVIDUAL" {
            log::info!("Legacy entry {} has type {}, skipping", entry_id, entry_type);
            continue;
        }

        let mut snapshots: Vec<&JsonValue> = entry
            .get("snapshots")
            .and_then(JsonValue::as_array)
            .map(|s| s.iter().collect())
            .unwrap_or_default();
        if snapshots.is_empty() {
            log::error!("Legacy entry {} has no snapshots, skipping", entry_id);
            continue;
        }
        snapshots.sort_by_key(|s| s.get("date").and_then(JsonValue::as_i64).unwrap_or(0));

        let mut entities = Vec::new();
        for (idx, snapshot) in snapshots.iter().enumerate() {
            match find_individual(snapshot) {
                Some(entity) => entities.push(entity_to_map(entity)?),
                None => log::error!(
                    "Legacy entry {}'s snapshot #{} has no individual entity",
                    entry_id,
                    idx + 1
                ),
            }
        }

        if entities.is_empty() {
            continue;
        }
        heroes.push(hero_from_entities(&entities)?);
    }

    log::info!("Extracted {} heroes from legacy", heroes.len());
    Ok(heroes)
}

fn find_individual(snapshot: &JsonValue) -> Option<&Vec<JsonValue>> {
    snapshot
        .get("entities")?
        .as_array()?
        .iter()
        .filter_map(JsonValue::as_array)
        .find(|entity| entity.iter().any(|item| item.as_str() == Some("individual")))
}

/// Convert the `[id, key1, val1, key2, val2, ...]` entity form into a map with an `id` key.
fn entity_to_map(entity: &[JsonValue]) -> Result<Map<String, JsonValue>> {
    let mut map = Map::new();
    for idx in (0..entity.len()).step_by(2) {
        let key = if idx == 0 {
            "id"
        } else {
            entity[idx - 1]
                .as_str()
                .ok_or_else(|| ChartError::Parse(format!("Entity key is not a string: {}", entity[idx - 1])))?
        };
        let value = &entity[idx];
        if !value.is_object() {
            return Err(ChartError::Parse(format!("Entity value for {} is not an object", key)));
        }
        map.insert(key.to_string(), value.clone());
    }
    Ok(map)
}

fn aspect_entries<'a>(map: &'a Map<String, JsonValue>, pointer: &str) -> &'a [JsonValue] {
    let (section, rest) = pointer.split_once('/').unwrap_or((pointer, ""));
    map.get(section)
        .and_then(|v| v.pointer(&format!("/{}", rest)))
        .and_then(JsonValue::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Build a raw hero from the decoded snapshots of one individual, oldest first.
fn hero_from_entities(entities: &[Map<String, JsonValue>]) -> Result<RawHero> {
    let Some((last, older)) = entities.split_last() else {
        return Err(ChartError::Parse("Individual has no snapshots".to_string()));
    };

    let id = last
        .get("id")
        .and_then(|v| v.get("value"))
        .and_then(JsonValue::as_str)
        .ok_or_else(|| ChartError::Parse("Individual has no id".to_string()))?
        .to_string();
    let name = last
        .get("status")
        .and_then(|v| v.get("name"))
        .and_then(JsonValue::as_str)
        .unwrap_or(id.as_str())
        .to_string();

    let mut aspects = Vec::new();
    for entry in aspect_entries(last, "status/aspects/entries") {
        aspects.push(Aspect::from_entry(entry)?);
    }
    for entry in aspect_entries(last, "history/legacyAspects/entries") {
        let mut aspect = Aspect::from_entry(entry)?;
        aspect.is_legacy = true;
        aspects.push(aspect);
    }

    for snapshot in older.iter().rev() {
        for entry in aspect_entries(snapshot, "status/aspects/entries") {
            let mut aspect = Aspect::from_entry(entry)?;
            if aspects.iter().any(|a| a.same_as(&aspect)) {
                continue;
            }
            aspect.is_past = true;
            aspects.push(aspect);
        }
    }

    Ok(RawHero { id, name, aspects })
}
