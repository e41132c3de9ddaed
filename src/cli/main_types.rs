use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "immo-cli")]
#[command(about = "Back-office console for the real-estate marketplace API")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// Bearer token; overrides the stored session token
    #[arg(long, global = true, env = "IMMO_API_TOKEN")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authentication commands
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// User administration
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Property administration
    Property {
        #[command(subcommand)]
        command: PropertyCommands,
    },
    /// Announcement browsing
    Announcement {
        #[command(subcommand)]
        command: AnnouncementCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Login to the marketplace back office
    Login,
    /// Logout and clear the stored token
    Logout,
    /// Show authentication status
    Status,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set a profile field (url, email)
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Listing flags shared by the user/property/announcement tables.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Search term matched against the view's searchable fields
    #[arg(long)]
    pub search: Option<String>,

    /// Sort field path, e.g. "price" or "owner.title"
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long)]
    pub desc: bool,

    /// Page to display
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Rows per page
    #[arg(long, default_value = "10")]
    pub page_size: usize,

    /// Browse pages interactively
    #[arg(long)]
    pub interactive: bool,

    /// Write the filtered rows (all pages) to a CSV file
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users
    List {
        #[command(flatten)]
        args: ListArgs,
        /// Keep only active (true) or inactive (false) users
        #[arg(long)]
        active: Option<bool>,
        /// User type ID filter
        #[arg(long)]
        user_type: Option<u32>,
        /// Role ID filter
        #[arg(long)]
        role: Option<u32>,
        /// Owner-account approval filter
        #[arg(long)]
        account_approved: Option<bool>,
        /// Owner-account type ID filter
        #[arg(long)]
        account_type: Option<u32>,
        /// Creation date lower bound (YYYY-MM-DD, inclusive)
        #[arg(long)]
        created_from: Option<NaiveDate>,
        /// Creation date upper bound (YYYY-MM-DD, inclusive)
        #[arg(long)]
        created_to: Option<NaiveDate>,
    },
    /// Enable a user account
    Activate { id: u32 },
    /// Disable a user account
    Deactivate { id: u32 },
    /// Approve or reject a user's owner account
    ValidateAccount {
        user_id: u32,
        /// Reject instead of approve
        #[arg(long)]
        reject: bool,
        /// Account type to assign on approval
        #[arg(long, default_value = "1")]
        account_type: u32,
        /// Initial wallet balance
        #[arg(long, default_value = "0")]
        first_wallet: u32,
        /// Validation comment
        #[arg(long)]
        comment: Option<String>,
    },
    /// Create a back-office user (prompts for the password)
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "1")]
        country: String,
        #[arg(long, default_value = "2")]
        role: String,
        /// Record the user as female
        #[arg(long)]
        female: bool,
    },
    /// Delete a user
    Delete {
        id: u32,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum PropertyCommands {
    /// List properties
    List {
        #[command(flatten)]
        args: ListArgs,
        /// Property type ID filter
        #[arg(long)]
        property_type: Option<u32>,
        /// Approval status filter
        #[arg(long)]
        approved: Option<bool>,
        /// Pool filter
        #[arg(long)]
        pool: Option<bool>,
        /// Minimum price (inclusive)
        #[arg(long)]
        min_price: Option<f64>,
        /// Maximum price (inclusive)
        #[arg(long)]
        max_price: Option<f64>,
    },
    /// Approve a pending property
    Approve {
        id: u32,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Reject a pending property
    Reject {
        id: u32,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Create a property on behalf of an owner
    Create {
        /// Owner account ID
        #[arg(long)]
        owner: u32,
        #[arg(long)]
        property_type: u32,
        #[arg(long)]
        city: u32,
        #[arg(long)]
        level: u32,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        area: f64,
        #[arg(long)]
        pool: bool,
        #[arg(long)]
        bedrooms: Option<u32>,
        #[arg(long)]
        bathrooms: Option<u32>,
        #[arg(long)]
        living_rooms: Option<u32>,
        #[arg(long, default_value = "0")]
        garage_places: u32,
    },
    /// Delete a property
    Delete {
        id: u32,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show the type/level/city catalogs used by `property create`
    Catalogs,
}

#[derive(Subcommand, Debug)]
pub enum AnnouncementCommands {
    /// List announcements
    List {
        #[command(flatten)]
        args: ListArgs,
        /// Announcement type ID filter
        #[arg(long)]
        announcement_type: Option<u32>,
        /// Status ID filter
        #[arg(long)]
        status: Option<u32>,
        /// Minimum price (inclusive)
        #[arg(long)]
        min_price: Option<f64>,
        /// Maximum price (inclusive)
        #[arg(long)]
        max_price: Option<f64>,
    },
    /// Show one announcement in detail
    Show { id: u32 },
}
