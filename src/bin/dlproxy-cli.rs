use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_DISPOSITION, CONTENT_TYPE, ETAG};

use download_proxy::catalog;
use download_proxy::config::loader;

#[derive(Parser)]
#[command(name = "dlproxy-cli")]
#[command(about = "Management CLI for the download proxy", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    CheckConfig {
        /// Path to the TOML config
        path: PathBuf,
    },
    /// Audit catalog download links against the download prefix
    AuditCatalog {
        /// Path to catalog.json
        path: PathBuf,

        #[arg(short, long, default_value = "/dl/")]
        prefix: String,
    },
    /// Fetch an asset through a running proxy and show the rewritten headers
    Probe {
        /// Asset path, e.g. "my-book/my-book.pdf"
        asset: String,

        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,

        #[arg(short, long, default_value = "/dl/")]
        prefix: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckConfig { path } => {
            let config = loader::load_config(&path)?;
            println!("OK: {}", path.display());
            println!("  listener   {}", config.listener.bind_address);
            println!("  upstream   {}", config.upstream.base_url);
            println!("  prefix     {}", config.downloads.path_prefix);
            println!("  site root  {}", config.site.root.display());
        }
        Commands::AuditCatalog { path, prefix } => {
            let books = catalog::load_catalog(&path)?;
            let issues = catalog::audit_links(&books, &prefix);

            if issues.is_empty() {
                println!("OK: {} books, all links under {}", books.len(), prefix);
            } else {
                for issue in &issues {
                    eprintln!("{}", issue);
                }
                eprintln!("{} broken link(s) in {}", issues.len(), path.display());
                std::process::exit(1);
            }
        }
        Commands::Probe { asset, url, prefix } => {
            let target = format!("{}{}{}", url.trim_end_matches('/'), prefix, asset);
            println!("GET {}", target);

            let client = reqwest::Client::new();
            let res = client.get(&target).send().await?;

            println!("status              {}", res.status());
            for name in [CONTENT_TYPE, CONTENT_DISPOSITION, ACCESS_CONTROL_ALLOW_ORIGIN, ETAG] {
                if let Some(value) = res.headers().get(&name) {
                    println!("{:<19} {}", name.as_str(), value.to_str().unwrap_or("<binary>"));
                }
            }

            if !res.status().is_success() {
                let body = res.text().await.unwrap_or_default();
                if !body.is_empty() {
                    println!("body                {}", body);
                }
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
