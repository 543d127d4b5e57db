mod render;
mod shop;

use anyhow::Context;
use clap::{Parser, Subcommand};
use grocer_client::{ClientConfig, GroceryApi, HttpGroceryApi, QueryClient};
use grocer_core::types::{Filter, ItemId};
use reqwest::Url;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "grocer")]
#[command(about = "Browse the grocery list and fill a cart from the terminal")]
struct Cli {
    /// API origin, overriding `GROCER_API_URL`.
    #[arg(long, global = true)]
    api_url: Option<Url>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the grocery list.
    List {
        /// Narrow the list (`fruits` or `vegetables`).
        #[arg(long)]
        kind: Option<Filter>,
    },
    /// Print the cart.
    Cart,
    /// Add an item to the cart and print the updated cart.
    Add { id: ItemId },
    /// Interactive storefront session.
    Shop,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing (stderr, so command output stays clean) ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grocer_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // --- Configuration ---
    let mut config = ClientConfig::from_env().context("invalid client configuration")?;
    if let Some(api_url) = cli.api_url {
        config.base_url = api_url;
    }
    tracing::debug!(base_url = %config.base_url, "Loaded client configuration");

    let api = HttpGroceryApi::new(&config).context("failed to build HTTP client")?;
    let mut stdout = tokio::io::stdout();

    match cli.command {
        Commands::List { kind } => {
            let items = api.fetch_list(kind).await.map_err(report)?;
            let text = format!("[{}]\n{}", render::filter_label(kind), render::items(&items));
            stdout.write_all(text.as_bytes()).await?;
        }
        Commands::Cart => {
            let cart = api.fetch_cart().await.map_err(report)?;
            let text = format!(
                "Element in the cart: {}\n{}",
                cart.len(),
                render::items(&cart)
            );
            stdout.write_all(text.as_bytes()).await?;
        }
        Commands::Add { id } => {
            let cart = api.add_to_cart(id).await.map_err(report)?;
            let text = format!("Element in the cart: {}\n", cart.len());
            stdout.write_all(text.as_bytes()).await?;
        }
        Commands::Shop => {
            let client = QueryClient::new(api);
            shop::run(&client, BufReader::new(tokio::io::stdin()), stdout).await?;
            return Ok(());
        }
    }

    stdout.flush().await?;
    Ok(())
}

/// Keep the server's own message in front for API errors.
fn report(err: grocer_client::ClientError) -> anyhow::Error {
    match err.api_error() {
        Some(_) => anyhow::anyhow!(render::error(&err).trim_end().to_string()),
        None => anyhow::Error::new(err),
    }
}
