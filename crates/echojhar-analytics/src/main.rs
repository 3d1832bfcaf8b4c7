use std::fs;

use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use echojhar_analytics::catalog::{JsonProductCatalog, Product, ProductCatalog};
use echojhar_analytics::cli::{validate_label, Args, Command};
use echojhar_analytics::config::{load_config_or_default, AnalyticsConfig};
use echojhar_analytics::data::aggregate::{aggregate, Granularity};
use echojhar_analytics::error::AnalyticsResult;
use echojhar_analytics::jitter::SeededJitter;
use echojhar_analytics::metrics::forecast::forecast_revenue;
use echojhar_analytics::report::{Dashboard, ReportRequest};
use echojhar_analytics::results::{
    host_name, series_digest, ReportContext, ReportEnvelope, SCHEMA_VERSION,
};
use echojhar_analytics::settings::SettingsStore;

fn main() -> AnalyticsResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = load_config_or_default(args.config.as_deref())?;
    let mut settings = match args.settings.as_deref() {
        Some(path) => Some(SettingsStore::open(path)?),
        None => None,
    };
    if let Some(settings) = settings.as_ref() {
        settings.apply_to(&mut config);
    }
    args.window.apply_to(&mut config);
    if let Some(catalog) = args.catalog.clone() {
        config.catalog_path = Some(catalog);
    }
    config.validate()?;

    let request = ReportRequest::from_config(&config, Utc::now().date_naive());
    // Unseeded runs still pin one seed so every output of the run shares a series.
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut dashboard = Dashboard::new();

    match &args.command {
        Command::Series => {
            let series = dashboard.series(&request, seed);
            let out = serde_json::json!({
                "granularity": request.granularity,
                "footfall": aggregate(&series.footfall(), request.granularity),
                "revenue": aggregate(&series.revenue(), request.granularity),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Report {
            save_settings,
            all_granularities,
        } => {
            validate_label(&args.label)?;
            let catalog = load_catalog(&config)?;
            let out_dir = args.results_dir.join(&args.label);
            fs::create_dir_all(&out_dir)?;

            let mut outputs = vec![(request.clone(), "report.json".to_string())];
            if *all_granularities {
                for granularity in [Granularity::Day, Granularity::Week, Granularity::Month] {
                    let regrouped = ReportRequest {
                        granularity,
                        ..request.clone()
                    };
                    outputs.push((regrouped, format!("report-{}.json", granularity.as_str())));
                }
            }

            for (request, file_name) in outputs {
                let (series, report) = dashboard.report(&request, seed, catalog.as_slice());
                let envelope = ReportEnvelope {
                    schema_version: SCHEMA_VERSION,
                    context: ReportContext {
                        schema_version: SCHEMA_VERSION,
                        label: args.label.clone(),
                        created_at: Utc::now(),
                        host: host_name(),
                        seed: Some(seed),
                        series_sha256: series_digest(&series)?,
                    },
                    report,
                };
                let out_file = out_dir.join(file_name);
                fs::write(&out_file, serde_json::to_vec_pretty(&envelope)?)?;
                println!("wrote report: {}", out_file.display());
            }
            info!(series = dashboard.cached_series(), "reports share cached series");

            if *save_settings {
                match settings.as_mut() {
                    Some(settings) => {
                        settings.record_from(&config);
                        settings.save()?;
                        info!(path = %settings.path().display(), "saved dashboard settings");
                    }
                    None => warn!("--save-settings has no effect without --settings"),
                }
            }
        }
        Command::Forecast => {
            let series = dashboard.series(&request, seed);
            let mut jitter = SeededJitter::from_seed(seed);
            let points = forecast_revenue(&series, request.granularity, &mut jitter);
            println!("{}", serde_json::to_string_pretty(&points)?);
        }
        Command::Doctor => print_doctor(&args, &config, &request),
    }

    Ok(())
}

fn load_catalog(config: &AnalyticsConfig) -> AnalyticsResult<Vec<Product>> {
    match config.catalog_path.as_deref() {
        Some(path) => Ok(JsonProductCatalog::load(path)?.products().to_vec()),
        None => Ok(Vec::new()),
    }
}

fn print_doctor(args: &Args, config: &AnalyticsConfig, request: &ReportRequest) {
    println!("echojhar-analytics doctor");
    println!(
        "config={}",
        args.config
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "default".to_string())
    );
    println!(
        "settings={}",
        args.settings
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string())
    );
    println!("results_dir={}", args.results_dir.display());
    println!("label={}", args.label);
    println!("days={} (requested {})", request.days, config.days);
    println!("end_date={}", request.end_date);
    println!("granularity={}", request.granularity.as_str());
    println!("conversion_rate={}", request.conversion_rate);
    println!("festival_months={:?}", request.season.festival_months);
    println!("forecast={}", request.forecast);
    println!("rating_weeks={}", request.rating_weeks);
    println!(
        "seed={}",
        config
            .seed
            .map(|seed| seed.to_string())
            .unwrap_or_else(|| "entropy".to_string())
    );
    println!(
        "catalog={}",
        config
            .catalog_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "seed list".to_string())
    );
}
