//! Customer Desk CLI
//!
//! Terminal front end for the customers API:
//! - List customers
//! - Add a customer through the validated create form
//! - Generate a config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use customer_desk::config::{generate_default_config, Config, LoggingConfig};
use customer_desk::{
    CustomerApi, CustomerDialog, DataLoader, Field, HttpCustomerClient, LoaderState,
    SubmitOutcome,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "customer-desk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "List customers and add new ones")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all customers
    List,

    /// Add a customer
    Add {
        /// First name (letters only)
        #[arg(long)]
        first_name: String,
        /// Last name (letters only)
        #[arg(long)]
        last_name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Business name (optional)
        #[arg(long, default_value = "")]
        business_name: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_tracing(&config.logging);

    let api: Arc<dyn CustomerApi> = Arc::new(
        HttpCustomerClient::new(config.api.client_config())
            .context("failed to build HTTP client")?,
    );
    let loader = DataLoader::new(Arc::clone(&api));

    match cli.command {
        Commands::List => {
            loader.refresh().await;
            render_list(&loader.snapshot(), &cli.format)?;
        }

        Commands::Add {
            first_name,
            last_name,
            email,
            business_name,
        } => {
            let dialog = CustomerDialog::new(api, loader.clone());
            dialog.open();
            dialog.set_field(Field::FirstName, first_name);
            dialog.set_field(Field::LastName, last_name);
            dialog.set_field(Field::Email, email);
            dialog.set_field(Field::BusinessName, business_name);

            match dialog.submit().await {
                SubmitOutcome::Created => {
                    println!("Customer created.");
                    println!();

                    let mut updates = loader.subscribe();
                    let state = updates
                        .wait_for(|s| {
                            !s.is_validating() && (s.data().is_some() || s.error().is_some())
                        })
                        .await
                        .context("customer list closed before refreshing")?
                        .clone();
                    render_list(&state, &cli.format)?;
                }
                SubmitOutcome::Invalid => {
                    eprintln!("Please fix the following:");
                    for (field, message) in dialog.snapshot().errors().iter() {
                        eprintln!("  {}: {}", field.label(), message);
                    }
                    std::process::exit(1);
                }
                SubmitOutcome::Rejected(message) => {
                    eprintln!("Failed to add customer: {}", message);
                    std::process::exit(1);
                }
                other => {
                    eprintln!("Customer was not submitted ({:?})", other);
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", content);
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("customer_desk={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Print the customer list. A load error replaces the list.
fn render_list(state: &LoaderState, format: &str) -> anyhow::Result<()> {
    let customers = match (state.error(), state.data()) {
        (Some(error), _) => {
            eprintln!("Error: {}", error);
            std::process::exit(1);
        }
        (None, Some(customers)) => customers,
        (None, None) => {
            println!("Loading...");
            return Ok(());
        }
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(customers)?);
        return Ok(());
    }

    if customers.is_empty() {
        println!("No customers yet.");
        println!();
        println!("Add your first one with:");
        println!("  customer-desk add --first-name Jane --last-name Doe --email jane@doe.com");
        return Ok(());
    }

    println!("{:<30} {}", "Name", "Email");
    println!("{}", "-".repeat(60));
    for customer in customers {
        println!("{:<30} {}", customer.display_name(), customer.email);
    }

    Ok(())
}
