//! Luxe CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! luxe-cli migrate
//!
//! # Create (or reset) a superadmin account
//! luxe-cli superadmin -e admin@example.com -p 'password123' -n "Super Admin"
//!
//! # Seed demo data (organization, categories, sections, products)
//! luxe-cli seed
//!
//! # Print an argon2 hash for a password
//! luxe-cli hash-password 'hunter2'
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `superadmin` - Upsert a superadmin account
//! - `seed` - Seed database with demo data
//! - `hash-password` - Hash a password for manual provisioning

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "luxe-cli")]
#[command(author, version, about = "Luxe CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Create or reset a superadmin account
    Superadmin {
        /// Superadmin email address
        #[arg(short, long)]
        email: String,

        /// Superadmin password
        #[arg(short, long)]
        password: String,

        /// Display name
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Seed database with demo data
    Seed,
    /// Print an argon2 hash for a password
    HashPassword {
        /// The password to hash
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Superadmin {
            email,
            password,
            name,
        } => {
            commands::superadmin::create(&email, &password, name.as_deref()).await?;
        }
        Commands::Seed => commands::seed::run().await?,
        Commands::HashPassword { password } => commands::hash::run(&password)?,
    }
    Ok(())
}
