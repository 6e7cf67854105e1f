// ABOUTME: Entry point for parlor — a terminal chat client for a remote assistant service.
// ABOUTME: Parses CLI args, loads config, and runs login/logout or the chat TUI.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use parlor::api::RestClient;
use parlor::app::App;
use parlor::auth::{self, TokenStore};
use parlor::config::Config;

#[derive(Parser)]
#[command(name = "parlor", about = "Terminal chat client for a remote assistant service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the session tokens.
    Login {
        /// Account email; falls back to PARLOR_EMAIL, then an interactive prompt.
        #[arg(long)]
        email: Option<String>,
    },
    /// Clear the stored session tokens.
    Logout,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load local .env if present (PARLOR_EMAIL / PARLOR_PASSWORD for
    // non-interactive login).
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = Config::load()?;
    let tokens = TokenStore::new(Config::tokens_path());

    match cli.command {
        Some(Command::Login { email }) => login_command(&config, &tokens, email).await,
        Some(Command::Logout) => {
            tokens.clear()?;
            eprintln!("Logged out.");
            Ok(())
        }
        None => chat_command(config, tokens).await,
    }
}

/// Run the chat TUI. Refuses to start without a stored token — the
/// terminal analogue of redirecting to the login page.
async fn chat_command(config: Config, tokens: TokenStore) -> anyhow::Result<()> {
    if tokens.snapshot().is_none() {
        anyhow::bail!("not logged in — run `parlor login` first");
    }

    init_logging()?;

    let store = Arc::new(RestClient::new(&config.server.base_url, tokens));
    App::new(&config, store).run().await
}

/// `parlor login` — exchange credentials for tokens and persist them.
async fn login_command(
    config: &Config,
    tokens: &TokenStore,
    email: Option<String>,
) -> anyhow::Result<()> {
    let email = match email.or_else(|| std::env::var("PARLOR_EMAIL").ok()) {
        Some(email) => email,
        None => prompt("Email: ")?,
    };
    let password = match std::env::var("PARLOR_PASSWORD").ok() {
        Some(password) => password,
        None => prompt("Password: ")?,
    };

    match auth::login(&config.server.base_url, &email, &password).await {
        Ok(set) => {
            tokens.save(&set)?;
            eprintln!("Login successful. Tokens stored in {}", tokens.path().display());
            Ok(())
        }
        Err(err) => anyhow::bail!("login failed: {err}"),
    }
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("failed to read input")?;
    Ok(line.trim().to_string())
}

/// Log to ~/.parlor/parlor.log so the alternate screen stays clean.
fn init_logging() -> anyhow::Result<()> {
    let path = Config::log_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("parlor=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
