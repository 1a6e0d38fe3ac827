use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use campaign_qr_api::api::config::ApiConfig;
use campaign_qr_api::api::start_server;
use campaign_qr_api::url_generator::{self, CreateOptions, ParamSpec};
use campaign_qr_api::utils::logger::init_logger;

#[derive(Debug, Parser)]
#[command(name = "campaign_qr_api", version, about = "Campaign URL generator and QR code server")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the web server
    Serve {
        /// Configuration file (toml, yaml or json)
        #[arg(short, long)]
        config: Option<String>,

        /// Address to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print every URL for a base URL and parameter values
    Generate {
        /// Base URL
        #[arg(short, long)]
        url: String,

        /// Parameter as key=value1,value2 (values are percent-encoded)
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<ParamSpec>,

        /// Parameter as key=value1,value2 (values are used as given)
        #[arg(long = "raw-param", value_parser = parse_param)]
        raw_params: Vec<ParamSpec>,

        /// Text appended to the path as a slug
        #[arg(short, long)]
        slug: Option<String>,
    },
    /// Print every query string for the given parameter values
    Search {
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<ParamSpec>,

        #[arg(long = "raw-param", value_parser = parse_param)]
        raw_params: Vec<ParamSpec>,
    },
}

/// Parses `key=value1,value2` into a parameter spec
fn parse_param(input: &str) -> Result<ParamSpec> {
    let (key, values) = input
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key=value1,value2, got '{}'", input))?;
    if key.is_empty() {
        return Err(anyhow!("parameter key cannot be empty"));
    }
    Ok(ParamSpec::new(key, values.split(',')))
}

fn merge(params: Vec<ParamSpec>, raw_params: Vec<ParamSpec>) -> Vec<ParamSpec> {
    params
        .into_iter()
        .chain(raw_params.into_iter().map(|spec| spec.skip_encoding(true)))
        .collect()
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, host, port } => {
            let mut config = ApiConfig::load(config.as_deref())?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            init_logger(config.log_dir.as_deref())?;
            info!("Configuration loaded: {:?}", config);
            start_server(config).await?;
        }
        Command::Generate { url, params, raw_params, slug } => {
            let mut options = CreateOptions::new(url, merge(params, raw_params));
            options.slug = slug;
            for url in url_generator::create(options).await? {
                println!("{}", url);
            }
        }
        Command::Search { params, raw_params } => {
            for query in url_generator::search(merge(params, raw_params)).await? {
                println!("{}", query);
            }
        }
    }

    Ok(())
}
