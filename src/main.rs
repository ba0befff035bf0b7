use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use contactus::{AppState, Config, router};
use contactus_form::{ContactForm, ContactFormData, HttpMessageClient, SubmitOutcome, Toasts};
use contactus_shared::QueryType;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions};

/// contactus - contact form service
#[derive(Parser)]
#[command(name = "contactus")]
#[command(about = "Contact form API, page and command line client", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Submit a contact message to a running server
    Send(SendArgs),
}

#[derive(Args, Debug)]
struct SendArgs {
    #[arg(long, default_value_t)]
    first_name: String,

    #[arg(long, default_value_t)]
    last_name: String,

    #[arg(long, default_value_t)]
    email: String,

    /// "General Enquiry" or "Support Request"
    #[arg(long)]
    query_type: Option<QueryType>,

    #[arg(long, default_value_t)]
    message: String,

    /// Consent to being contacted
    #[arg(long)]
    agree: bool,

    /// Server base URL (overrides config file)
    #[arg(long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    contactus::observability::init_observability(
        "contactus",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
        Commands::Migrate => migrate_command(config).await,
        Commands::Send(args) => send_command(config, args).await,
    }
}

#[tracing::instrument(skip(config))]
async fn serve_command(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting contactus server...");

    let host = host_override.unwrap_or(config.server.host);
    let port = port_override.unwrap_or(config.server.port);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    let app = router(AppState::new(pool));

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn migrate_command(config: Config) -> Result<()> {
    tracing::info!("Running database migrations...");

    if !sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::info!("Database does not exist, creating: {}", config.database.url);
        sqlx::Sqlite::create_database(&config.database.url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await?;

    contactus_db::migrate(&pool).await?;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn send_command(config: Config, args: SendArgs) -> Result<()> {
    let base_url = args.url.unwrap_or_else(|| config.client.base_url.clone());
    let client = HttpMessageClient::new(&base_url, config.client.timeout())?;

    let form = ContactForm::new(client, Toasts::default()).with_data(ContactFormData {
        first_name: args.first_name,
        last_name: args.last_name,
        email_address: args.email,
        query_type: args.query_type,
        message: args.message,
        service_agreement: args.agree,
    });

    let outcome = form.submit().await;

    for toast in form.toasts().snapshot() {
        println!("[{}] {}: {}", toast.kind, toast.title, toast.message);
    }

    match outcome {
        SubmitOutcome::Sent(message) => {
            tracing::info!(id = message.id, "Contact message sent");
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("{field}: {message}");
            }
            anyhow::bail!("contact form has {} invalid field(s)", errors.len())
        }
        SubmitOutcome::Failed(err) => Err(err.into()),
        SubmitOutcome::Ignored => anyhow::bail!("a submission is already in flight"),
    }
}
