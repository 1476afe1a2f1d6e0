use crate::core::export::ExportFormat;
use crate::core::report::ReportKey;
use clap::{Parser, Subcommand};

/// Command-line interface definition for crewledger
/// CLI application to track worked hours and payments per agent with SQLite
#[derive(Parser)]
#[command(
    name = "crewledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track worked hours, payments and balances for field agents using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path, absolute or relative to the config directory
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check, migrate or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Run configuration file migrations if needed")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage agents
    Agent {
        #[command(subcommand)]
        action: AgentCommands,
    },

    /// Manage job sites
    Site {
        #[command(subcommand)]
        action: SiteCommands,
    },

    /// Record worked time for an agent
    Add {
        /// Agent name or id
        agent: String,

        #[arg(long = "date", help = "Entry date (YYYY-MM-DD), defaults to today")]
        date: Option<String>,

        /// Worked hours as a decimal ("7.5"); alternative to --in/--out
        #[arg(long = "hours", conflicts_with_all = ["start", "end"])]
        hours: Option<String>,

        #[arg(long = "in", help = "Start time (HH:MM)")]
        start: Option<String>,

        #[arg(long = "out", help = "End time (HH:MM)")]
        end: Option<String>,

        #[arg(long = "rate", help = "Hourly rate override for this entry")]
        rate: Option<String>,

        #[arg(long = "site", help = "Job site (created on the fly if new)")]
        site: Option<String>,

        #[arg(long = "note", help = "Free-form note")]
        note: Option<String>,
    },

    /// Edit an existing entry
    Edit {
        /// Entry id
        id: i64,

        #[arg(long = "date", help = "New entry date (YYYY-MM-DD)")]
        date: Option<String>,

        /// Replace worked hours (drops any stored clock pair)
        #[arg(long = "hours", conflicts_with_all = ["start", "end"])]
        hours: Option<String>,

        #[arg(long = "in", help = "New start time (HH:MM)")]
        start: Option<String>,

        #[arg(long = "out", help = "New end time (HH:MM)")]
        end: Option<String>,

        #[arg(long = "rate", help = "New hourly rate for this entry")]
        rate: Option<String>,

        /// New job site; pass an empty string to detach the entry
        #[arg(long = "site")]
        site: Option<String>,

        #[arg(long = "note", help = "Replace the note")]
        note: Option<String>,
    },

    /// List entries (or payments) for an agent
    List {
        /// Agent name or id
        agent: String,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long = "unpaid", help = "Show only entries with an unpaid remainder")]
        unpaid: bool,

        #[arg(long = "payments", help = "List payments instead of entries")]
        payments: bool,
    },

    /// Show balances for all agents, or one
    Balance {
        /// Agent name or id (all agents when omitted)
        agent: Option<String>,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,
    },

    /// Record a payment and spread it over unpaid entries, oldest first
    Pay {
        /// Agent name or id
        agent: String,

        /// Amount paid, as a decimal ("150" or "150.50")
        #[arg(required_unless_present = "all")]
        amount: Option<String>,

        #[arg(
            long = "all",
            conflicts_with = "amount",
            help = "Pay the agent's full outstanding balance"
        )]
        all: bool,

        #[arg(long = "date", help = "Payment date (YYYY-MM-DD), defaults to today")]
        date: Option<String>,

        #[arg(long = "note", help = "Free-form note")]
        note: Option<String>,

        #[arg(long = "force", short = 'f', help = "Skip the overpayment confirmation")]
        force: bool,
    },

    /// Delete an entry or a payment
    Del {
        #[command(subcommand)]
        target: DelCommands,
    },

    /// Break an agent's billed work down by site or month
    Report {
        /// Agent name or id
        agent: String,

        #[arg(long = "by", value_enum, default_value = "site")]
        by: ReportKey,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,
    },

    /// Export an agent's entries
    Export {
        /// Agent name or id
        agent: String,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite the output file without asking")]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },
}

#[derive(Subcommand)]
pub enum AgentCommands {
    /// Register a new agent
    Add {
        name: String,

        #[arg(long = "rate", help = "Hourly rate (defaults to the configured rate)")]
        rate: Option<String>,
    },

    /// List registered agents
    List,

    /// Rename an agent (history and balances follow the agent id)
    Rename {
        /// Agent name or id
        agent: String,

        /// New name
        name: String,
    },

    /// Change an agent's default hourly rate for future entries
    Rate {
        /// Agent name or id
        agent: String,

        /// New hourly rate
        rate: String,
    },

    /// Delete an agent that has no entries or payments left
    Del {
        /// Agent name or id
        agent: String,

        #[arg(long = "force", short = 'f', help = "Skip the confirmation prompt")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum SiteCommands {
    /// Register a new job site
    Add { name: String },

    /// List registered sites
    List,

    /// Delete a site that no entry references
    Del {
        /// Site name or id
        site: String,

        #[arg(long = "force", short = 'f', help = "Skip the confirmation prompt")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum DelCommands {
    /// Delete a time entry by id
    Entry {
        id: i64,

        #[arg(long = "force", short = 'f', help = "Skip the confirmation prompt")]
        force: bool,
    },

    /// Delete a payment record by id (entry settlement stays as is)
    Payment {
        id: i64,

        #[arg(long = "force", short = 'f', help = "Skip the confirmation prompt")]
        force: bool,
    },
}
