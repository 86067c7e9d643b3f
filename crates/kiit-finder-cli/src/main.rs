use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use tracing::debug;

use kiit_finder::http::{MemoryNavigator, Navigator, Notification, Notifier, Severity};
use kiit_finder::services::SessionState;
use kiit_finder::state::{ClientContext, init_client_context};
use kiit_finder_core::Role;
use kiit_finder_models::{LoginRequest, RegisterRequest};
use kiit_finder_observability::init_logging;

#[derive(Parser)]
#[command(name = "kiit-finder-cli")]
#[command(about = "KIIT Finder CLI - Sign in and inspect the local session", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session locally
    Login {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Register {
        /// Full name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Requested role, forwarded to the server as-is
        #[arg(short = 'r', long)]
        role: Option<String>,
    },
    /// Remove the stored session
    Logout,
    /// Show the cached profile and the role in the current token
    Whoami,
    /// Show whether the stored session is usable and when it expires
    Status,
    /// Run the route guard for a view location
    Check {
        /// View location, e.g. /admin/users
        location: String,

        /// Role the view requires (USER or ADMIN)
        #[arg(short = 'r', long)]
        role: Option<Role>,
    },
}

/// Prints notifications to stderr.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let marker = match notification.severity {
            Severity::Info => "ℹ️ ",
            Severity::Destructive => "❌",
        };
        eprintln!(
            "{} {}: {}",
            marker, notification.title, notification.description
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let _logging = init_logging();

    let cli = Cli::parse();

    let start = match &cli.command {
        Commands::Check { location, .. } => location.clone(),
        _ => "/".to_string(),
    };
    let navigator = Arc::new(MemoryNavigator::new(start));
    let notifier = Arc::new(ConsoleNotifier);
    let context = init_client_context(notifier.clone(), navigator.clone())
        .context("Failed to initialize client")?;
    debug!(
        api = %context.api.base_url(),
        session_file = %context.session_config.session_file.display(),
        "Client initialized"
    );

    match cli.command {
        Commands::Login { email, password } => handle_login(&context, email, password).await,
        Commands::Register {
            name,
            email,
            password,
            role,
        } => handle_register(&context, name, email, password, role).await,
        Commands::Logout => {
            context.auth.logout();
            notifier.notify(Notification::info(
                "Signed Out",
                "The local session has been removed.",
            ));
            Ok(())
        }
        Commands::Whoami => handle_whoami(&context),
        Commands::Status => handle_status(&context),
        Commands::Check { location, role } => handle_check(&context, &navigator, &location, role),
    }
}

fn prompt_text(prompt: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Input::new()
            .with_prompt(prompt)
            .interact_text()
            .with_context(|| format!("Failed to read {}", prompt.to_lowercase())),
    }
}

fn prompt_password(value: Option<String>, confirm: bool) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords don't match");
    }
    prompt.interact().context("Failed to read password")
}

async fn handle_login(
    context: &ClientContext,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let email = prompt_text("Email address", email)?;
    let password = prompt_password(password, false)?;

    let profile = context
        .auth
        .login(LoginRequest { email, password })
        .await
        .context("Login failed")?;

    println!("\n✅ Logged in as {} <{}>", profile.name, profile.email);
    if let Some(role) = context.auth.get_role() {
        println!("   Role: {}", role);
    }
    Ok(())
}

async fn handle_register(
    context: &ClientContext,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Option<String>,
) -> Result<()> {
    let name = prompt_text("Name", name)?;
    let email = prompt_text("Email address", email)?;
    let password = prompt_password(password, true)?;

    let profile = context
        .auth
        .register(RegisterRequest {
            name,
            email,
            password,
            role,
        })
        .await
        .context("Registration failed")?;

    println!("\n✅ Account created for {} <{}>", profile.name, profile.email);
    if let Some(role) = context.auth.get_role() {
        println!("   Role: {}", role);
    }
    Ok(())
}

fn handle_whoami(context: &ClientContext) -> Result<()> {
    match context.auth.current_profile_from_cache() {
        Some(profile) => {
            println!("Name:  {}", profile.name);
            println!("Email: {}", profile.email);
            println!("ID:    {}", profile.id);
        }
        None => println!("No cached profile"),
    }
    match context.auth.get_role() {
        Some(role) => println!("Role:  {} (from session token)", role),
        None => println!("Role:  none (not signed in)"),
    }
    Ok(())
}

fn handle_status(context: &ClientContext) -> Result<()> {
    match context.auth.state() {
        SessionState::Authenticated(role) => println!("✅ Signed in as {}", role),
        SessionState::Anonymous if context.auth.has_stored_token() => {
            println!("⚠️  Stored session is expired or unreadable")
        }
        SessionState::Anonymous => println!("Not signed in"),
    }

    if let Some(expires_at) = context.auth.session_expires_at() {
        let remaining = expires_at - Utc::now();
        if remaining.num_seconds() > 0 {
            println!(
                "   Expires at {} (in {} min)",
                expires_at.to_rfc3339(),
                remaining.num_minutes()
            );
        } else {
            println!("   Expired at {}", expires_at.to_rfc3339());
        }
    }
    println!("   API: {}", context.api.base_url());
    println!(
        "   Session file: {}",
        context.session_config.session_file.display()
    );
    Ok(())
}

fn handle_check(
    context: &ClientContext,
    navigator: &MemoryNavigator,
    location: &str,
    role: Option<Role>,
) -> Result<()> {
    if context.guard.enforce(location, role) {
        println!("✅ {} would render", location);
        return Ok(());
    }

    let destination = navigator.current_location();
    match navigator.take_return_to() {
        Some(return_to) => println!(
            "↪️  Redirected to {} (return to {})",
            destination, return_to
        ),
        None => println!("↪️  Redirected to {}", destination),
    }
    Ok(())
}
