use std::io;
use std::process::ExitCode;

use clap::Parser;
use gitpod_finder::{
    scan, Config, ConfigOverrides, ReqwestTransport, ScanError, SourcegraphClient,
};
use tracing::{debug, error};

// CLI arguments, each one overrides its environment variable
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base API URL, e.g. https://sourcegraph.example.com/.api [env: SOURCEGRAPH_URL]
    #[arg(long)]
    base_url: Option<String>,

    /// Access token sent as a bearer token [env: SOURCEGRAPH_TOKEN]
    #[arg(long)]
    token: Option<String>,

    /// File to look for at each repository root
    #[arg(long, value_name = "NAME")]
    file: Option<String>,
}

impl From<Cli> for ConfigOverrides {
    fn from(cli: Cli) -> Self {
        ConfigOverrides {
            base_url: cli.base_url,
            token: cli.token,
            target_file: cli.file,
        }
    }
}

fn init_logger() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.into())?;
    let transport = ReqwestTransport::new()?;
    let client = SourcegraphClient::new(&config, transport);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    scan::run(&client, &mut out).await?;
    Ok(())
}

// The scan already wrote this one to stdout
fn is_reported(e: &anyhow::Error) -> bool {
    matches!(
        e.downcast_ref::<ScanError>(),
        Some(ScanError::Organizations(_))
    )
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    init_logger();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if is_reported(&e) {
                debug!("{:#}", e);
            } else {
                error!("{:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}
