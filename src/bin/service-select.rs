use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::json;

use service_selector::config::load_config;
use service_selector::observability::logging::init_logging;
use service_selector::selection::{Criteria, Parameter, SelectableService};

#[derive(Parser)]
#[command(name = "service-select")]
#[command(about = "Pick the backend service matching a request context", long_about = None)]
struct Cli {
    /// Selector configuration file (TOML).
    #[arg(short, long, default_value = "selectors.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select a service for the given criteria
    Select(CriteriaArgs),
    /// Validate the configuration and list selectors
    Check,
}

#[derive(Args)]
struct CriteriaArgs {
    #[arg(long)]
    application: Option<String>,

    #[arg(long = "user")]
    authenticated_user: Option<String>,

    #[arg(long)]
    execution_type: Option<String>,

    #[arg(long)]
    execution_id: Option<String>,

    #[arg(long)]
    origin: Option<String>,

    #[arg(long)]
    location: Option<String>,

    /// Parameter as `name=value1,value2` (repeatable)
    #[arg(long = "param", value_parser = parse_param)]
    parameters: Vec<Parameter>,

    /// Print the criteria and selected service as JSON
    #[arg(long)]
    json: bool,
}

impl CriteriaArgs {
    fn to_criteria(&self) -> Criteria {
        let mut criteria = Criteria::new();
        if let Some(v) = &self.application {
            criteria = criteria.with_application(v);
        }
        if let Some(v) = &self.authenticated_user {
            criteria = criteria.with_authenticated_user(v);
        }
        if let Some(v) = &self.execution_type {
            criteria = criteria.with_execution_type(v);
        }
        if let Some(v) = &self.execution_id {
            criteria = criteria.with_execution_id(v);
        }
        if let Some(v) = &self.origin {
            criteria = criteria.with_origin(v);
        }
        if let Some(v) = &self.location {
            criteria = criteria.with_location(v);
        }
        if !self.parameters.is_empty() {
            criteria = criteria.with_parameters(self.parameters.clone());
        }
        criteria
    }
}

fn parse_param(raw: &str) -> Result<Parameter, String> {
    let (name, values) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value[,value...], got {:?}", raw))?;
    if name.is_empty() {
        return Err("parameter name must not be empty".to_string());
    }
    let values: Vec<&str> = values.split(',').filter(|v| !v.is_empty()).collect();
    Ok(Parameter::new(name, values))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logging level comes from the config file.
    let config = load_config(&cli.config)?;
    let _ = init_logging(&config.logging.level);
    tracing::info!(
        path = %cli.config.display(),
        selectors = config.selectors.len(),
        "Configuration loaded"
    );

    let registry = SelectableService::from_config(&config)?;

    match cli.command {
        Commands::Select(args) => {
            let criteria = args.to_criteria();
            let service = registry.select(Some(&criteria))?;
            if args.json {
                let out = json!({ "criteria": criteria, "service": service });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", service);
            }
        }
        Commands::Check => {
            println!("{}: {} selector(s)", cli.config.display(), registry.len());
            for (index, selector) in config.selectors.iter().enumerate() {
                let marker = if index == 0 { " (fallback)" } else { "" };
                println!(
                    "  [{}] {} priority={} service={}{}",
                    index,
                    selector.rule.kind(),
                    selector.priority,
                    selector.service,
                    marker
                );
            }
        }
    }

    Ok(())
}
