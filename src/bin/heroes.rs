use anyhow::{Context, Result};
use clap::Parser;
use relchart::{load_legacy, Hero, Legacy, RelationshipKind};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "heroes")]
#[command(about = "List heroes and relationships of a legacy, for writing chart filters")]
struct Args {
    /// Path to legacy.json or legacy.json.zip
    legacy_path: PathBuf,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct RelationshipRow<'a> {
    source: &'a str,
    target: &'a str,
    kind: String,
    /// Parent endpoint has no hero record
    unresolved: bool,
}

#[derive(Serialize)]
struct Listing<'a> {
    heroes: &'a [Hero],
    relationships: Vec<RelationshipRow<'a>>,
}

fn relationship_rows(legacy: &Legacy) -> Vec<RelationshipRow<'_>> {
    legacy
        .relationships()
        .iter()
        .map(|rel| RelationshipRow {
            source: rel.source.id(),
            target: rel.target.id(),
            kind: match &rel.kind {
                RelationshipKind::Parent => "parent".to_string(),
                RelationshipKind::Sibling => "sibling".to_string(),
                RelationshipKind::Bond(bond) => bond.key(),
            },
            unresolved: rel.source.hero_id().is_none(),
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let legacy = load_legacy(&args.legacy_path)
        .with_context(|| format!("Failed to load legacy from {}", args.legacy_path.display()))?;

    let listing = Listing {
        heroes: legacy.heroes(),
        relationships: relationship_rows(&legacy),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("\n=== Heroes ({}) ===\n", listing.heroes.len());
    println!("{:-<80}", "");
    println!(
        "{:<24} {:<12} {:<30} {:<10} {:<8}",
        "Name", "Short id", "Id", "Gender", "Class"
    );
    println!("{:-<80}", "");
    for hero in listing.heroes {
        println!(
            "{:<24} {:<12} {:<30} {:<10} {:<8}",
            hero.name,
            hero.short_id,
            hero.id,
            hero.gender.as_str(),
            hero.class.as_str()
        );
    }
    println!("{:-<80}", "");

    println!("\n=== Relationships ({}) ===\n", listing.relationships.len());
    println!("{:-<80}", "");
    for row in &listing.relationships {
        let source = legacy
            .hero(row.source)
            .map(|h| h.name.as_str())
            .unwrap_or("(unknown parent)");
        let target = legacy
            .hero(row.target)
            .map(|h| h.name.as_str())
            .unwrap_or(row.target);
        println!("{:<24} {:<20} {}", source, row.kind, target);
    }
    println!("{:-<80}", "");

    Ok(())
}
