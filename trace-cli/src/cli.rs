//! Command-line surface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use trace_client::{
    ClientConfig, ClientError, ErrorAction, EventType, InputError, LineDecoder, LoginForm,
    RegisterForm, Role, Route, ScanSession, SessionStore, TraceClient, parse_product_id,
    route_for_scan,
};

use crate::render;

const DEFAULT_SESSION_PATH: &str = ".trace/session.json";

#[derive(Debug, Parser)]
#[command(name = "trace", version, about = "Track food products through the supply chain")]
pub struct Cli {
    /// Backend API root (overrides TRACE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Where the login session is kept (overrides TRACE_SESSION_PATH)
    #[arg(long, global = true)]
    pub session: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn session_path(&self, config: &ClientConfig) -> PathBuf {
        self.session
            .clone()
            .or_else(|| config.session_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_PATH))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account
    Register {
        username: String,
        /// FARMER, DISTRIBUTOR or RESTAURANT
        #[arg(long)]
        role: Option<Role>,
        #[arg(long, env = "TRACE_PASSWORD", hide_env_values = true)]
        password: String,
        /// Repeat the password
        #[arg(long)]
        confirm: String,
    },
    /// Log in and remember the credentials
    Login {
        username: String,
        #[arg(long, env = "TRACE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored credentials
    Logout,
    /// Show how many products you own
    Dashboard,
    /// List the products you own
    Products,
    /// Create a product
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        origin: String,
        /// Initial location
        #[arg(long)]
        location: String,
    },
    /// Record an event for a product
    LogEvent {
        product_id: i64,
        /// SHIPPED, RECEIVED, QUALITY_CHECK, DAMAGED or SOLD
        event_type: EventType,
        #[arg(long)]
        description: String,
        #[arg(long)]
        location: String,
    },
    /// Hand a product over to another user
    Handover {
        product_id: i64,
        /// New owner's user ID
        #[arg(long)]
        to: i64,
        #[arg(long)]
        location: String,
        #[arg(long)]
        description: String,
    },
    /// Show a product's full history
    Trace {
        /// Product ID (as printed in its QR code)
        product_id: String,
    },
    /// Print the QR payload of a product
    Qr { product_id: i64 },
    /// Read decoded QR codes from stdin (e.g. piped from zbarcam) and show
    /// the trace of the first one
    Scan,
}

/// Why a command did not complete
#[derive(Debug)]
pub enum Failure {
    /// The backend call failed
    Client(ClientError),
    /// Stopped before any call
    Guard(ErrorAction),
    Other(anyhow::Error),
}

impl From<ClientError> for Failure {
    fn from(err: ClientError) -> Self {
        Failure::Client(err)
    }
}

impl From<InputError> for Failure {
    fn from(err: InputError) -> Self {
        Failure::Guard(ErrorAction {
            message: err.to_string(),
            redirect: None,
        })
    }
}

/// What to tell the user to do when a flow redirects
pub fn hint_for(route: Route) -> &'static str {
    match route {
        Route::Login => "run `trace login <username>`",
        Route::Register => "run `trace register <username>`",
        Route::Dashboard => "run `trace dashboard`",
        Route::Products => "run `trace products`",
        Route::Trace(_) => "run `trace trace <product-id>`",
    }
}

fn require_login(client: &TraceClient) -> Result<(), Failure> {
    ErrorAction::require_login(client.session().as_ref())
        .map(drop)
        .map_err(Failure::Guard)
}

impl Command {
    pub async fn run(self, client: &TraceClient) -> Result<(), Failure> {
        match self {
            Command::Register {
                username,
                role,
                password,
                confirm,
            } => {
                let form = RegisterForm {
                    username,
                    password,
                    confirm,
                    role,
                };
                let (credentials, role) = form.validate()?;
                let message = client
                    .register(credentials.username(), credentials.password(), role)
                    .await?;
                println!("{message}");
                println!("Next: {}", hint_for(Route::Login));
            }
            Command::Login { username, password } => {
                let credentials = LoginForm { username, password }.validate()?;
                let outcome = client
                    .login(credentials.username(), credentials.password())
                    .await?;
                println!("{} Welcome, {}.", outcome.message, outcome.username);
                println!("Next: {}", hint_for(Route::Dashboard));
            }
            Command::Logout => {
                client
                    .logout()
                    .map_err(|e| Failure::Other(anyhow::Error::new(e)))?;
                println!("Logged out.");
            }
            Command::Dashboard => {
                require_login(client)?;
                let username = client.session().username().unwrap_or_default();
                let products = client.get_all_products().await?;
                print!("{}", render::dashboard(&username, products.len()));
                println!("Next: {}", hint_for(Route::Products));
            }
            Command::Products => {
                require_login(client)?;
                let products = client.get_all_products().await?;
                print!("{}", render::products(&products));
            }
            Command::Create {
                name,
                origin,
                location,
            } => {
                require_login(client)?;
                let product = client.create_product(&name, &origin, &location).await?;
                println!("Product created with ID {}.", product.id);
                print!("{}", render::products(std::slice::from_ref(&product)));
            }
            Command::LogEvent {
                product_id,
                event_type,
                description,
                location,
            } => {
                require_login(client)?;
                let event = client
                    .log_event(product_id, event_type, &description, &location)
                    .await?;
                println!(
                    "Event {} ({}) logged for product {product_id}.",
                    event.id, event.event_type
                );
            }
            Command::Handover {
                product_id,
                to,
                location,
                description,
            } => {
                require_login(client)?;
                let message = client
                    .handover_product(product_id, to, &location, &description)
                    .await?;
                println!("{message}");
            }
            Command::Trace { product_id } => {
                let id = parse_product_id(&product_id)?;
                require_login(client)?;
                let trace = client.get_product_trace(id).await?;
                print!("{}", render::trace(&trace));
            }
            Command::Qr { product_id } => {
                require_login(client)?;
                let data = client.get_qr_code_data(product_id).await?;
                println!("{data}");
            }
            Command::Scan => {
                require_login(client)?;
                let mut session =
                    ScanSession::new(LineDecoder::new(BufReader::new(tokio::io::stdin())));
                let decoded = session
                    .scan()
                    .await
                    .map_err(|e| Failure::Other(anyhow::Error::new(e)))?;
                println!("QR Code Scanned: {decoded}");
                let route = route_for_scan(&decoded)?;
                tracing::debug!(%route, "Following scanned code");
                let Route::Trace(id) = route else {
                    return Err(Failure::Other(anyhow::anyhow!(
                        "scanned code does not lead to a trace"
                    )));
                };
                let trace = client.get_product_trace(id).await?;
                print!("{}", render::trace(&trace));
            }
        }
        Ok(())
    }
}
