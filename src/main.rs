use applepay_tokenizer::application::client::ApplePayClient;
use applepay_tokenizer::domain::metadata::{ClientMetadata, Integration, Source};
use applepay_tokenizer::domain::ports::{ApiClient, ApiClientRef};
use applepay_tokenizer::infrastructure::authorization::Authorization;
use applepay_tokenizer::infrastructure::http::{HttpApiClient, HttpClientConfig};
use applepay_tokenizer::interfaces::json::payment_token_reader::PaymentTokenReader;
use applepay_tokenizer::interfaces::json::report_writer::ReportWriter;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Tokenization key or client token
    #[arg(long)]
    authorization: String,

    /// Client API root; derived from the authorization when omitted
    #[arg(long)]
    base_url: Option<Url>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Integration style reported in request metadata
    #[arg(long, default_value_t = Integration::Custom)]
    integration: Integration,

    /// Payment method source reported in request metadata
    #[arg(long, default_value_t = Source::Unknown)]
    source: Source,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show whether Apple Pay is enabled for the merchant
    Status,
    /// Exchange a device payment token (JSON file) for a nonce
    Tokenize {
        token_file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = HttpClientConfig::new(Authorization::parse(&cli.authorization).into_diagnostic()?);
    config.base_url = cli.base_url;
    config.timeout = Duration::from_secs(cli.timeout_secs);

    let api: ApiClientRef = Arc::new(
        HttpApiClient::new(config)
            .into_diagnostic()?
            .with_metadata(
                ClientMetadata::new()
                    .source(cli.source)
                    .integration(cli.integration),
            ),
    );
    let client = ApplePayClient::new(api.clone());

    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock());

    match cli.command {
        Command::Status => {
            let configuration = api.fetch_configuration().await.into_diagnostic()?;
            writer
                .write_status(&configuration.apple_pay())
                .into_diagnostic()?;
        }
        Command::Tokenize { token_file } => {
            let file = File::open(token_file).into_diagnostic()?;
            let token = PaymentTokenReader::new(file).read_token().into_diagnostic()?;
            let tokenized = client.tokenize(&token).await.into_diagnostic()?;
            writer.write_tokenized(&tokenized).into_diagnostic()?;
        }
    }

    Ok(())
}
