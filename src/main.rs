use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use sitemetrics::metrics::of_category;
use sitemetrics::{
    Category, DashboardSummary, DistanceField, GeoPoint, LoggingConfig, SiteMetricsConfig,
    SiteMetricsError, distance_drift, distance_km, estimated_travel_minutes, nearest_n,
    reference_dataset, validate_locations,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Distance and competitor metrics for recycling sites around the new yard
#[derive(Parser, Debug)]
#[command(name = "sitemetrics", version, about)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dashboard figures for the reference dataset
    Summary,
    /// List locations
    Locations {
        /// recycling-shop, paper-factory or plastic-factory
        #[arg(long)]
        category: Option<Category>,
        /// Show a single location by id
        #[arg(long, conflicts_with = "category")]
        id: Option<String>,
    },
    /// Strategic advantages of the new yard
    Analysis,
    /// Haversine distance between two "lat,lon" points
    Distance {
        #[arg(long, allow_hyphen_values = true)]
        from: GeoPoint,
        #[arg(long, allow_hyphen_values = true)]
        to: GeoPoint,
    },
    /// Locations nearest to a reference site
    Nearest {
        #[arg(long, value_enum, default_value_t = FieldArg::SiteA)]
        field: FieldArg,
        /// Defaults to the configured ranking length
        #[arg(long, allow_negative_numbers = true)]
        count: Option<i64>,
        #[arg(long)]
        category: Option<Category>,
    },
    /// Check the dataset and report stored distances that drift from live values
    Validate {
        /// Defaults to the configured drift tolerance
        #[arg(long)]
        tolerance: Option<f64>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FieldArg {
    SiteA,
    SiteB,
}

impl From<FieldArg> for DistanceField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::SiteA => DistanceField::SiteA,
            FieldArg::SiteB => DistanceField::SiteB,
        }
    }
}

#[derive(Debug, Serialize)]
struct DistanceReport {
    from: GeoPoint,
    to: GeoPoint,
    distance_km: f64,
    estimated_minutes: f64,
}

fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if logging.format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {e}");
    }
}

fn print_output<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{rendered}");
    } else {
        print!("{}", text());
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().or_else(SiteMetricsConfig::get_config_path);
    let config = SiteMetricsConfig::load_from_path(cli.config.clone())?;
    init_tracing(&config.logging, cli.verbose);

    if cli.verbose {
        if let Some(path) = &config_path {
            eprintln!("Using config from: {}", path.display());
        }
        eprintln!("Log level: {}", config.logging.level);
    }
    debug!("Config: {:?}", config);

    let dataset = reference_dataset()?;

    match cli.command.unwrap_or(Command::Summary) {
        Command::Summary => {
            let summary = DashboardSummary::compute(dataset, &config.metrics)?;
            print_output(cli.json, &summary, || summary.to_string())
        }
        Command::Locations { category, id } => {
            let locations: Vec<_> = match (id, category) {
                (Some(id), _) => {
                    let location = dataset.location(&id).ok_or_else(|| {
                        SiteMetricsError::invalid_argument(format!("no location with id {id}"))
                    })?;
                    vec![location]
                }
                (None, Some(category)) => of_category(&dataset.locations, category),
                (None, None) => dataset.locations.iter().collect(),
            };
            print_output(cli.json, &locations, || {
                let mut out = format!("{} locations\n", locations.len());
                for l in &locations {
                    out.push_str(&format!(
                        "  [{}] {} ({}) at {} - {} km / {} km\n",
                        l.id,
                        l.name,
                        l.category,
                        l.position.format_coordinates(6),
                        l.distance_from_site_a,
                        l.distance_from_site_b
                    ));
                }
                out
            })
        }
        Command::Analysis => {
            let analysis = &dataset.strategic_analysis;
            print_output(cli.json, analysis, || {
                let mut out = format!("{} strategic advantages\n", analysis.len());
                for a in analysis {
                    out.push_str(&format!(
                        "  [{} impact] {} - {}: {}\n",
                        a.impact, a.category, a.title, a.description
                    ));
                }
                out
            })
        }
        Command::Distance { from, to } => {
            let distance = distance_km(from, to)?;
            let report = DistanceReport {
                from,
                to,
                distance_km: distance,
                estimated_minutes: estimated_travel_minutes(distance, config.metrics.minutes_per_km)?,
            };
            print_output(cli.json, &report, || {
                format!(
                    "{:.2} km (about {} min)\n",
                    report.distance_km, report.estimated_minutes
                )
            })
        }
        Command::Nearest {
            field,
            count,
            category,
        } => {
            let count = match count {
                Some(count) => count,
                None => i64::try_from(config.metrics.top_competitors)
                    .context("Configured ranking length is too large")?,
            };
            let field = DistanceField::from(field);
            let candidates = match category {
                Some(category) => of_category(&dataset.locations, category),
                None => dataset.locations.iter().collect(),
            };
            let nearest = nearest_n(candidates, field, count)?;
            print_output(cli.json, &nearest, || {
                let mut out = String::new();
                for (index, l) in nearest.iter().enumerate() {
                    out.push_str(&format!(
                        "  #{} {} ({}) - {} km\n",
                        index + 1,
                        l.name,
                        l.category,
                        l.distance(field)
                    ));
                }
                out
            })
        }
        Command::Validate { tolerance } => {
            validate_locations(&dataset.locations)?;
            let tolerance = tolerance.unwrap_or(config.metrics.drift_tolerance_km);
            let drift = distance_drift(&dataset.locations, &dataset.site_a, &dataset.site_b, tolerance)?;
            print_output(cli.json, &drift, || {
                let mut out = format!(
                    "{} locations valid, {} stored distances off by more than {} km\n",
                    dataset.locations.len(),
                    drift.len(),
                    tolerance
                );
                for d in &drift {
                    out.push_str(&format!(
                        "  [{}] {:?}: stored {} km, computed {:.2} km\n",
                        d.location_id, d.field, d.stored_km, d.computed_km
                    ));
                }
                out
            })
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = e
                .downcast_ref::<SiteMetricsError>()
                .map_or_else(|| format!("{e:#}"), SiteMetricsError::user_message);
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}
