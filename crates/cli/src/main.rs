//! Shopwai CLI - a command line storefront.
//!
//! # Usage
//!
//! ```bash
//! # Create a vendor account (logs in)
//! shopwai register --name Maria --email maria@example.com \
//!     --password secret --confirm secret --role vendor
//!
//! # List a product
//! shopwai products add --name "Farinha de Mandioca" --price 15,00
//!
//! # Shop as a customer
//! shopwai login --email joao@example.com --password secret --role customer
//! shopwai products list --search farinha
//! shopwai cart add <product-id>
//! shopwai cart show
//! ```
//!
//! # Commands
//!
//! - `register`, `login`, `logout`, `whoami` - Accounts and the session
//! - `products` - Browse the catalog; vendors manage their own products
//! - `cart` - The logged-in user's cart
//! - `users` - List registered accounts

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use shopwai_core::{ProductId, Role};
use shopwai_storefront::config::StorefrontConfig;
use shopwai_storefront::error::{AppError, Result};
use shopwai_storefront::state::AppState;
use shopwai_storefront::telemetry;

mod commands;

use commands::products::ImageChange;

#[derive(Parser)]
#[command(name = "shopwai")]
#[command(author, version, about = "Shopwai storefront CLI")]
struct Cli {
    /// Data directory (overrides `SHOPWAI_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Password again
        #[arg(long)]
        confirm: String,

        /// Account type (`customer`, `vendor`)
        #[arg(short, long, default_value = "customer")]
        role: Role,
    },
    /// Log in
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Account type (`customer`, `vendor`)
        #[arg(short, long, default_value = "customer")]
        role: Role,
    },
    /// Log out
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Browse and manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage your cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Inspect registered accounts
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products
    List {
        /// Only names containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Only your own products (vendors)
        #[arg(long)]
        mine: bool,
    },
    /// List a new product (vendors)
    Add {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Price, e.g. 15.00 or 15,00
        #[arg(short, long)]
        price: String,

        /// Image URL
        #[arg(short, long)]
        image: Option<String>,
    },
    /// Edit one of your products (vendors)
    Update {
        /// Product ID
        #[arg(long)]
        id: ProductId,

        /// New name
        #[arg(short, long)]
        name: String,

        /// New price
        #[arg(short, long)]
        price: String,

        /// New image URL; omit to keep the current one
        #[arg(short, long, conflicts_with = "clear_image")]
        image: Option<String>,

        /// Remove the image
        #[arg(long)]
        clear_image: bool,
    },
    /// Delete one of your products (vendors)
    Delete {
        /// Product ID
        #[arg(long)]
        id: ProductId,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List every account
    List,
    /// Show the account registered under an email
    Show {
        /// Email address
        #[arg(short, long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and total
    Show,
    /// Add one unit of a product
    Add { id: ProductId },
    /// One more unit of a product already in the cart
    Increase { id: ProductId },
    /// One less unit; removes the line at zero
    Decrease { id: ProductId },
    /// Remove a product from the cart
    Remove { id: ProductId },
    /// Empty the cart
    Clear,
}

fn main() {
    let cli = Cli::parse();

    let result = StorefrontConfig::from_env()
        .map_err(AppError::from)
        .and_then(|mut config| {
            if let Some(dir) = &cli.data_dir {
                config.data_dir.clone_from(dir);
            }
            telemetry::init(&config.log);
            run(cli.command, config)
        });

    match result {
        Ok(output) => print_output(&output),
        Err(e) => {
            e.report();
            print_error(&e);
            std::process::exit(1);
        }
    }
}

fn run(command: Commands, config: StorefrontConfig) -> Result<String> {
    let state = AppState::open(config)?;

    match command {
        Commands::Register {
            name,
            email,
            password,
            confirm,
            role,
        } => commands::account::register(&state, &name, &email, &password, &confirm, role),
        Commands::Login {
            email,
            password,
            role,
        } => commands::account::login(&state, &email, &password, role),
        Commands::Logout => commands::account::logout(&state),
        Commands::Whoami => commands::account::whoami(&state),
        Commands::Products { action } => match action {
            ProductAction::List { search, mine } => {
                commands::products::list(&state, search.as_deref(), mine)
            }
            ProductAction::Add { name, price, image } => {
                commands::products::add(&state, &name, &price, image.as_deref())
            }
            ProductAction::Update {
                id,
                name,
                price,
                image,
                clear_image,
            } => {
                let image = match (image, clear_image) {
                    (Some(url), _) => ImageChange::Set(url),
                    (None, true) => ImageChange::Clear,
                    (None, false) => ImageChange::Keep,
                };
                commands::products::update(&state, &id, name, price, image)
            }
            ProductAction::Delete { id } => commands::products::delete(&state, &id),
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add { id } => commands::cart::add(&state, &id),
            CartAction::Increase { id } => commands::cart::increase(&state, &id),
            CartAction::Decrease { id } => commands::cart::decrease(&state, &id),
            CartAction::Remove { id } => commands::cart::remove(&state, &id),
            CartAction::Clear => commands::cart::clear(&state),
        },
        Commands::Users { action } => match action {
            UserAction::List => commands::users::list(&state),
            UserAction::Show { email } => commands::users::show(&state, &email),
        },
    }
}

#[allow(clippy::print_stdout)]
fn print_output(output: &str) {
    if !output.is_empty() {
        println!("{output}");
    }
}

#[allow(clippy::print_stderr)]
fn print_error(error: &AppError) {
    eprintln!("error: {}", error.user_message());
}
