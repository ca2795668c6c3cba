use anyhow::{Context, Result};
use clap::Parser;
use relchart::chart::DEFAULT_GRAPH_NAME;
use relchart::{build_chart, load_legacy, ChartRenderer, Config, DotFileWriter, GraphvizRenderer};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "relchart")]
#[command(about = "Render a relationship chart from a legacy export")]
struct Args {
    /// Path to legacy.json or legacy.json.zip
    legacy_path: PathBuf,

    /// Path to save the rendered chart
    #[arg(short, long)]
    output_path: Option<PathBuf>,

    /// Write the raw .gv description instead of rendering an image
    #[arg(long)]
    norender: bool,

    /// Let relationships drive the layout (sometimes gives cleaner results)
    #[arg(short = 'R', long, alias = "prioritise-relationships")]
    prioritize_relationships: bool,

    /// Hide unknown parents
    #[arg(long)]
    hide_phantoms: bool,

    /// Pack the chart instead of spreading it horizontally
    #[arg(short = 'P', long)]
    pack: bool,

    /// Pack each family separately (implies --pack)
    #[arg(long)]
    pack_by_subgraphs: bool,

    /// Add a legend to the chart
    #[arg(short = 'L', long)]
    include_legend: bool,

    /// Draw every hero with the same shape
    #[arg(long)]
    no_gender_shapes: bool,

    /// Draw every hero in black
    #[arg(long)]
    no_class_colors: bool,

    /// Relationships to include; entry format is status[_type]
    #[arg(long, num_args = 1..)]
    include_relationships: Option<Vec<String>>,

    /// Relationships to exclude; entry format is status[_type]
    #[arg(long, num_args = 1..)]
    exclude_relationships: Option<Vec<String>>,

    /// Heroes to include; accepts a name, an id or a short id
    #[arg(long, num_args = 1..)]
    include_heroes: Option<Vec<String>>,

    /// Heroes to exclude; accepts a name, an id or a short id
    #[arg(long, num_args = 1..)]
    exclude_heroes: Option<Vec<String>>,

    /// Also keep the lineage and bond partners of included heroes
    #[arg(long)]
    with_relatives: bool,
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", "info")
    ).init();

    let args = Args::parse();
    let config = Config::load()?;

    let output_path = args
        .output_path
        .clone()
        .unwrap_or_else(|| config.render.output_path.clone());

    let mut options = config.chart.clone();
    if options.name == DEFAULT_GRAPH_NAME {
        let stem = output_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("chart");
        options.name = format!("{}_graph", stem);
    }
    options.prioritize_relationships |= args.prioritize_relationships;
    options.hide_phantoms |= args.hide_phantoms;
    options.pack |= args.pack;
    options.pack_by_subgraphs |= args.pack_by_subgraphs;
    options.include_legend |= args.include_legend;
    options.no_gender_shapes |= args.no_gender_shapes;
    options.no_class_colors |= args.no_class_colors;

    let filter = &mut options.filter;
    if args.include_relationships.is_some() {
        filter.include_relationships = args.include_relationships.clone();
    }
    if args.exclude_relationships.is_some() {
        filter.exclude_relationships = args.exclude_relationships.clone();
    }
    if args.include_heroes.is_some() {
        filter.include_heroes = args.include_heroes.clone();
    }
    if args.exclude_heroes.is_some() {
        filter.exclude_heroes = args.exclude_heroes.clone();
    }
    filter.include_relatives |= args.with_relatives;

    let legacy = load_legacy(&args.legacy_path)
        .with_context(|| format!("Failed to load legacy from {}", args.legacy_path.display()))?;
    log::info!(
        "Loaded {} heroes and {} relationships",
        legacy.heroes().len(),
        legacy.relationships().len()
    );

    let chart = build_chart(&legacy, &options)?;
    if !chart.warnings().is_empty() {
        log::warn!("{} filter entries matched nothing", chart.warnings().len());
    }

    let dot = chart.to_dot();
    let written = if args.norender || config.render.norender {
        DotFileWriter.render(&dot, &output_path)?
    } else {
        GraphvizRenderer::new(config.render.dot_program.as_str(), config.render.format.as_str())
            .render(&dot, &output_path)?
    };

    println!("{}", written.display());
    Ok(())
}
