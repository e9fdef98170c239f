use clap::Parser;
use podtrack_core::roster::Roster;
use podtrack_server::salesforce::SalesforceStore;
use podtrack_server::state::AppState;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "podtrack-server",
    about = "Youth-development pod tracking API backed by a CRM record store",
    version
)]
struct Args {
    /// Port to listen on
    #[arg(long, default_value = "8080", env = "PODTRACK_PORT")]
    port: u16,

    /// Salesforce instance base URL
    #[arg(long, env = "SALESFORCE_INSTANCE_URL")]
    salesforce_url: String,

    /// Salesforce API access token
    #[arg(long, env = "SALESFORCE_ACCESS_TOKEN", hide_env_values = true)]
    salesforce_token: String,

    /// HMAC key for session bearer tokens
    #[arg(long, env = "PODTRACK_SESSION_SECRET", hide_env_values = true)]
    session_secret: String,

    /// Shared secret for the signup endpoints
    #[arg(long, env = "VERIFY_SIGNUP_SECRET", hide_env_values = true)]
    signup_secret: String,

    /// Pod roster YAML (default: built-in Trainee/Associate/Partner)
    #[arg(long, env = "PODTRACK_ROSTER")]
    roster: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    let roster = Roster::load(args.roster.as_deref())?;
    let store = Arc::new(SalesforceStore::new(
        args.salesforce_url,
        args.salesforce_token,
    ));
    let state = AppState::new(store, roster, args.session_secret, args.signup_secret);

    // The Salesforce client is blocking; it is only ever driven from
    // spawn_blocking, so a plain multi-thread runtime is all we need.
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(podtrack_server::serve(state, args.port))
}
