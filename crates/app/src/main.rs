use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, ClientConfig};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt as log_fmt, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};
use vocab_core::model::UserId;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidUserId { raw: String },
    InvalidUrl { flag: &'static str, raw: String },
    MissingProfile { field: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidUserId { raw } => write!(f, "invalid --user-id value: {raw:?}"),
            ArgsError::InvalidUrl { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::MissingProfile { field } => {
                write!(f, "setup needs a {field} (flag or environment)")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    user_id: UserId,
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn user_id(&self) -> UserId {
        self.user_id.clone()
    }

    fn services(&self) -> AppServices {
        self.services.clone()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--user-id <id>] [--api-url <url>] [--backend-url <url>]");
    eprintln!("  cargo run -p app -- setup [--user-id <id>] --user-name <name> --email <email>");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url http://localhost:3000/api");
    eprintln!("  --backend-url http://localhost:8080");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  VOCAB_USER_ID, VOCAB_USER_NAME, VOCAB_USER_EMAIL,");
    eprintln!("  VOCAB_API_BASE_URL, VOCAB_BACKEND_URL, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Setup,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "setup" => Some(Self::Setup),
            _ => None,
        }
    }
}

struct Args {
    user_id: UserId,
    user_name: Option<String>,
    email: Option<String>,
    api: ClientConfig,
    backend: ClientConfig,
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_url(flag: &'static str, raw: String) -> Result<String, ArgsError> {
    match url::Url::parse(raw.trim()) {
        Ok(_) => Ok(raw.trim().to_string()),
        Err(_) => Err(ArgsError::InvalidUrl { flag, raw }),
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut user_id = env_value("VOCAB_USER_ID");
        let mut user_name = env_value("VOCAB_USER_NAME");
        let mut email = env_value("VOCAB_USER_EMAIL");
        let mut api = ClientConfig::api_from_env();
        let mut backend = ClientConfig::backend_from_env();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--user-id" => user_id = Some(require_value(args, "--user-id")?),
                "--user-name" => user_name = Some(require_value(args, "--user-name")?),
                "--email" => email = Some(require_value(args, "--email")?),
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    api.base_url = parse_url("--api-url", value)?;
                }
                "--backend-url" => {
                    let value = require_value(args, "--backend-url")?;
                    backend.base_url = parse_url("--backend-url", value)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let raw = user_id.unwrap_or_else(|| "local".into());
        let user_id = raw
            .parse::<UserId>()
            .map_err(|_| ArgsError::InvalidUserId { raw: raw.clone() })?;

        Ok(Self {
            user_id,
            user_name,
            email,
            api,
            backend,
        })
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(log_fmt::layer().compact().with_target(false))
        .try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };
    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    info!(
        user_id = %parsed.user_id,
        api = %parsed.api.base_url,
        backend = %parsed.backend.base_url,
        "starting vocab"
    );
    let services = AppServices::with_reqwest(parsed.api, parsed.backend);

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                user_id: parsed.user_id,
                services,
            });
            let context = build_app_context(&app);

            // Keep the window a regular one; some dev setups default to always-on-top.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Vocab")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Setup => {
            let user_name = parsed
                .user_name
                .ok_or(ArgsError::MissingProfile { field: "user name" })?;
            let email = parsed
                .email
                .ok_or(ArgsError::MissingProfile { field: "email" })?;
            if let Err(err) = services
                .user()
                .setup(&parsed.user_id, &user_name, &email)
                .await
            {
                warn!(error = %err, "user setup failed");
                return Err(err.user_message().into());
            }
            info!(user_id = %parsed.user_id, "user profile saved");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    init_logging();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
