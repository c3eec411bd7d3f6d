use std::fs;
use std::path::PathBuf;

use mortality_chart::api::{ChartParameterResolver, ChartPreset, ResolverConfig};
use mortality_chart::dataset::load_table_from_path;
use mortality_chart::telemetry::init_default_tracing;

const USAGE: &str = "Usage: cargo run --bin chart_frame_tool -- --csv <path> \
[--preset choropleth|growth-detail|bubble] [--config <json>] [--category <name>] \
[--list-categories] [--trace]";

#[derive(Debug)]
struct CliArgs {
    csv_path: PathBuf,
    preset: ChartPreset,
    config_path: Option<PathBuf>,
    category: Option<String>,
    list_categories: bool,
    trace: bool,
}

fn main() {
    let _ = init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let table = load_table_from_path(&args.csv_path).map_err(|err| err.to_string())?;

    let config = match &args.config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            ResolverConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => args.preset.config(),
    };
    let resolver = ChartParameterResolver::new(table, config).map_err(|err| err.to_string())?;
    let categories = resolver.categories();

    if args.list_categories {
        let json = serde_json::to_string_pretty(&categories)
            .map_err(|err| format!("failed to serialize categories: {err}"))?;
        println!("{json}");
        return Ok(());
    }

    let category = match args.category {
        Some(category) => category,
        None => categories
            .first()
            .cloned()
            .ok_or_else(|| "table has no categories".to_owned())?,
    };
    let frame = resolver
        .build_chart_frame(&category)
        .map_err(|err| err.to_string())?;

    let json = if args.trace {
        frame
            .to_plot_payload(&resolver.config().layout)
            .and_then(|payload| payload.to_json_pretty())
    } else {
        frame.to_json_contract_v1_pretty()
    }
    .map_err(|err| err.to_string())?;
    println!("{json}");
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut csv_path: Option<PathBuf> = None;
    let mut preset = ChartPreset::Choropleth;
    let mut config_path: Option<PathBuf> = None;
    let mut category: Option<String> = None;
    let mut list_categories = false;
    let mut trace = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--csv" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --csv".to_owned())?;
                csv_path = Some(PathBuf::from(value));
            }
            "--preset" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --preset".to_owned())?;
                preset = value.parse().map_err(|err: mortality_chart::ChartError| {
                    err.to_string()
                })?;
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config_path = Some(PathBuf::from(value));
            }
            "--category" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --category".to_owned())?;
                category = Some(value);
            }
            "--list-categories" => list_categories = true,
            "--trace" => trace = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`"));
            }
        }
    }

    let csv_path = csv_path.ok_or_else(|| format!("missing --csv\n{USAGE}"))?;
    Ok(CliArgs {
        csv_path,
        preset,
        config_path,
        category,
        list_categories,
        trace,
    })
}
