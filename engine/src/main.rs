// Engine main entry point: loads the report once and answers one query.
use anyhow::{Context, Result};
use clap::Parser;
use engine::config::EngineSettings;
use engine::data::RecordBuilder;
use engine::presentation::{self, QueryInput};
use engine::query::{self, distinct_values, lexicographic_order, numeric_order};
use engine::services::{ReportService, ReportSource};
use shared::models::{FilterDimension, QuerySpec};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "engine")]
#[command(about = "Search, filter and summarize the school balance report")]
struct Args {
    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report URL or local CSV path (overrides settings and REPORT_SOURCE)
    #[arg(long)]
    source: Option<String>,

    /// Free-text search over school name, INEP and SEC codes
    #[arg(short, long, default_value = "")]
    search: String,

    /// Filter as dimension=value (nte, municipio, mes, statusConta); repeatable
    #[arg(short, long = "filter", value_name = "DIM=VALUE")]
    filters: Vec<String>,

    /// Sort column, e.g. nte, escola, saldoDisponivel
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Show the full record at this index
    #[arg(long)]
    detail: Option<usize>,

    /// List units of the current view with this project deployed (e.g. labRobotica)
    #[arg(long)]
    project: Option<String>,

    /// Write the current view to a CSV file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Print the available NTE and municipality filter values
    #[arg(long)]
    facets: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    info!("Starting school balance report engine...");

    let mut settings = EngineSettings::load(args.config.as_deref())?;
    if let Some(source) = &args.source {
        settings.source = source.clone();
    }
    let source = ReportSource::parse(&settings.source);

    let service = ReportService::new(&settings)?;
    if let Err(e) = service.load(&source).await {
        eprintln!("{}", e.user_message());
        return Err(e.into());
    }
    let dataset = service.snapshot().await;

    if let Some(index) = args.detail {
        match dataset.get(index) {
            Some(unit) => print!("{}", presentation::render_detail(unit)),
            None => println!("Nenhuma escola com índice {}.", index),
        }
        return Ok(());
    }

    if args.facets {
        let ntes = distinct_values(dataset.units(), FilterDimension::Nte, numeric_order);
        let municipalities = distinct_values(dataset.units(), FilterDimension::Municipality, lexicographic_order);
        println!("NTEs: {}", ntes.join(", "));
        println!("Municípios: {}", municipalities.join(", "));
        return Ok(());
    }

    let base = QuerySpec::default().with_sort(settings.sort_key(), settings.sort_direction());
    let input = QueryInput {
        search: args.search.clone(),
        filters: args.filters.clone(),
        sort: args.sort.clone(),
        descending: args.desc,
    };
    let spec = presentation::spec_from_input(base, &input);
    let result = query::run(&dataset, &spec);

    if let Some(path) = &args.export {
        let csv = RecordBuilder::export_csv(result.units.iter().copied())?;
        std::fs::write(path, csv).with_context(|| format!("Failed to write '{}'", path.display()))?;
        info!(path = %path.display(), units = result.count(), "Exported current view");
    }

    if let Some(name) = &args.project {
        print!("{}", presentation::render_project_query(name, &result.units));
        return Ok(());
    }

    if args.json {
        let output = serde_json::json!({
            "load_id": dataset.load_id(),
            "loaded_at": dataset.loaded_at(),
            "source": dataset.source(),
            "count": result.count(),
            "summary": result.summary,
            "units": result.units,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", presentation::render_table(&result));
        println!();
        print!("{}", presentation::render_summary(&result.summary));
    }

    Ok(())
}
