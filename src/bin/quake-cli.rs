use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "quake-cli")]
#[command(about = "Command-line client for the earthquakes API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:8080")]
    url: String,

    /// Shared secret sent in the API key header.
    #[arg(short, long, env = "API_KEY")]
    key: Option<String>,

    #[arg(long, default_value = "X-API-Key")]
    header: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service liveness
    Health,
    /// Past day of earthquakes, all magnitudes
    Feed,
    /// Earthquakes for a time window and magnitude threshold
    Public {
        /// H, D, W or M
        #[arg(short, long)]
        timebox: String,
        /// 4.5+, 2.5+, 1.0+ or all
        #[arg(short, long)]
        magnitude: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let mut headers = HeaderMap::new();
    if let Some(key) = &cli.key {
        headers.insert(
            HeaderName::from_bytes(cli.header.as_bytes())?,
            HeaderValue::from_str(key)?,
        );
    }

    let request = match &cli.command {
        Commands::Health => client.get(format!("{}/health", base)),
        Commands::Feed => client.get(format!("{}/api/getEarthquakes", base)),
        Commands::Public { timebox, magnitude } => client
            .get(format!("{}/api/public/earthquakes", base))
            .query(&[("timebox", timebox), ("magnitude", magnitude)]),
    };

    let res = request.headers(headers).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            let detail = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_string))
                .unwrap_or(text);
            eprintln!("Detail: {}", detail);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
