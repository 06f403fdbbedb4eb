//! Customer Churn Prediction CLI
//!
//! Scores a customer against a pre-trained churn model and prints retention advice.

use clap::{Parser, Subcommand};
use churn::{Config, Contract, CustomerProfile, InternetType, Result};

#[derive(Parser)]
#[command(name = "churn")]
#[command(about = "Customer churn prediction from a pre-trained model", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict churn for one customer
    Predict {
        /// Tenure in months
        #[arg(long, default_value = "1")]
        tenure: u32,
        /// Monthly charge ($)
        #[arg(long, default_value = "85.0")]
        monthly_charge: f64,
        /// Total charges ($)
        #[arg(long, default_value = "85.0")]
        total_charges: f64,
        /// Average monthly long distance charges ($)
        #[arg(long, default_value = "22.0")]
        avg_long_distance: f64,
        /// Number of referrals
        #[arg(long, default_value = "0")]
        referrals: u32,
        /// Satisfaction score (1-5)
        #[arg(long, default_value = "1")]
        satisfaction: u8,
        /// Internet type: Fiber Optic, Cable, DSL or None
        #[arg(long, default_value = "Fiber Optic")]
        internet_type: InternetType,
        /// Contract: Month-to-Month, One Year or Two Year
        #[arg(long, default_value = "Month-to-Month")]
        contract: Contract,
        /// Read the customer profile from a JSON file instead of flags
        #[arg(long)]
        input: Option<String>,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Model management commands
    Model {
        #[command(subcommand)]
        action: ModelCommands,
    },
    /// Write a default config file
    Init,
}

#[derive(Subcommand)]
enum ModelCommands {
    /// Show model information
    Info,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use table or json.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or fall back to default config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Predict {
            tenure,
            monthly_charge,
            total_charges,
            avg_long_distance,
            referrals,
            satisfaction,
            internet_type,
            contract,
            input,
            format,
        } => {
            let profile = match input {
                Some(path) => CustomerProfile::from_json_file(&path),
                None => Ok(CustomerProfile {
                    tenure,
                    monthly_charge,
                    total_charges,
                    avg_long_distance,
                    num_referrals: referrals,
                    satisfaction,
                    internet_type,
                    contract,
                }),
            };
            profile.and_then(|p| commands::predict(&config, &p, format))
        }
        Commands::Model { action } => match action {
            ModelCommands::Info => commands::model_info(&config),
        },
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use churn::model::ModelStore;
    use churn::predict::{format_report, ChurnPredictor};

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        if let Some(dir) = std::path::Path::new(&config.model.artifact_path).parent() {
            std::fs::create_dir_all(dir).map_err(|e| churn::ChurnError::file(dir, e))?;
            println!("Created {}/ directory", dir.display());
        }

        println!("\nNext steps:");
        println!("  1. Place the trained model at {}", config.model.artifact_path);
        println!("  2. Run 'churn model info' to check it loads");
        println!("  3. Run 'churn predict --tenure 12 --contract \"One Year\"' to score a customer");

        Ok(())
    }

    pub fn predict(config: &Config, profile: &CustomerProfile, format: OutputFormat) -> Result<()> {
        let store = ModelStore::global(&config.model.artifact_path);
        let predictor = ChurnPredictor::from_store(store, config.thresholds)?;
        let report = predictor.predict(profile)?;

        match format {
            OutputFormat::Table => print!("{}", format_report(&report)),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&report)
                    .map_err(|e| churn::ChurnError::Parse(e.to_string()))?;
                println!("{}", json);
            }
        }

        Ok(())
    }

    pub fn model_info(config: &Config) -> Result<()> {
        let store = ModelStore::global(&config.model.artifact_path);
        let bundle = store.load()?;
        let names = bundle.schema.names();

        println!("Model Information");
        println!("───────────────────────────────");
        println!("  Path:       {}", store.path().display());
        println!("  Classifier: {}", bundle.classifier.kind());
        println!("  Features:   {}", names.len());
        println!(
            "  Thresholds: low < {:.2}, high > {:.2}, churn >= {:.2}",
            config.thresholds.low, config.thresholds.high, config.thresholds.decision
        );
        for name in names.iter().take(10) {
            println!("    {}", name);
        }
        if names.len() > 10 {
            println!("    ... {} more", names.len() - 10);
        }

        Ok(())
    }
}
