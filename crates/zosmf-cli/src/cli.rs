//! CLI argument parsing and configuration types.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::time::Duration;

use zosmf_client::session::ZosmfSession;

/// Main CLI application structure.
#[derive(Parser, Debug)]
#[command(
    name = "zosmf-cli",
    version,
    about = "Interact with z/OS TSO address spaces through the z/OSMF REST API",
    long_about = "zosmf-cli starts TSO address spaces on a remote z/OS system via z/OSMF, \
                  issues commands against them, collects their output, and tears them down.\n\n\
                  Connection details can be passed as flags or through the ZOSMF_HOST, \
                  ZOSMF_PORT, ZOSMF_USER, ZOSMF_PASSWORD, and ZOSMF_TOKEN environment variables."
)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, short = 'f', global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Concise human-readable output
    Human,
    /// Pretty-printed JSON
    Json,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// TSO address-space operations
    #[command(subcommand)]
    Tso(TsoCommands),
}

/// TSO address-space commands.
#[derive(Subcommand, Debug)]
pub enum TsoCommands {
    /// Issue a TSO command in a fresh address space and print its output
    Issue {
        #[command(flatten)]
        conn: Connection,

        /// Command text to issue
        #[arg(long, short = 'c')]
        command: String,

        /// Account number for the address space
        #[arg(long, short = 'a', env = "ZOSMF_ACCOUNT")]
        account: String,

        #[command(flatten)]
        start: StartArgs,
    },

    /// Start a TSO address space and print its servlet key
    Start {
        #[command(flatten)]
        conn: Connection,

        /// Account number for the address space
        #[arg(long, short = 'a', env = "ZOSMF_ACCOUNT")]
        account: String,

        #[command(flatten)]
        start: StartArgs,
    },

    /// Stop a TSO address space
    Stop {
        #[command(flatten)]
        conn: Connection,

        /// Servlet key identifying the address space
        servlet_key: String,
    },

    /// Ping a TSO address space
    Ping {
        #[command(flatten)]
        conn: Connection,

        /// Servlet key identifying the address space
        #[arg(long)]
        servlet_key: String,
    },

    /// App-to-app address-space communication
    #[command(subcommand)]
    App(AppCommands),
}

/// App-to-app communication commands.
#[derive(Subcommand, Debug)]
pub enum AppCommands {
    /// Start a TSO application, creating an address space if needed
    Start {
        #[command(flatten)]
        conn: Connection,

        /// Account number for the address space
        #[arg(long, short = 'a', env = "ZOSMF_ACCOUNT")]
        account: String,

        /// Application key
        #[arg(long)]
        app_key: String,

        /// Startup command executed inside the address space
        #[arg(long)]
        startup: String,

        /// Reuse an existing address space
        #[arg(long, requires = "queue_id")]
        servlet_key: Option<String>,

        /// Queue ID of the existing address space
        #[arg(long, requires = "servlet_key")]
        queue_id: Option<String>,

        #[command(flatten)]
        start: StartArgs,
    },

    /// Send a plain-text message to a running TSO application
    Send {
        #[command(flatten)]
        conn: Connection,

        /// Application key
        #[arg(long)]
        app_key: String,

        /// Servlet key identifying the address space
        #[arg(long)]
        servlet_key: String,

        /// Message text to send
        message: String,
    },

    /// Receive messages from a running TSO application
    Receive {
        #[command(flatten)]
        conn: Connection,

        /// Application key
        #[arg(long)]
        app_key: String,

        /// Servlet key identifying the address space
        #[arg(long)]
        servlet_key: String,

        /// Keep polling until the READY keyword arrives
        #[arg(long)]
        until_ready: bool,

        /// Wall-clock receive timeout in seconds
        #[arg(long, default_value_t = 600)]
        timeout: u64,
    },
}

/// z/OSMF connection arguments, shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct Connection {
    /// z/OSMF host
    #[arg(long, env = "ZOSMF_HOST")]
    pub host: String,

    /// z/OSMF port
    #[arg(long, env = "ZOSMF_PORT", default_value_t = 443)]
    pub port: u16,

    /// User for basic authentication
    #[arg(long, short = 'u', env = "ZOSMF_USER")]
    pub user: Option<String>,

    /// Password for basic authentication
    #[arg(long, env = "ZOSMF_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Bearer token (takes precedence over user/password)
    #[arg(long, env = "ZOSMF_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Skip TLS certificate validation (requires ZOSMF_ALLOW_INSECURE_TLS)
    #[arg(long)]
    pub insecure: bool,

    /// Use plain HTTP instead of HTTPS
    #[arg(long, hide = true)]
    pub no_tls: bool,

    /// Base path prepended to every resource (API mediation gateway)
    #[arg(long, env = "ZOSMF_BASE_PATH")]
    pub base_path: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

impl Connection {
    /// Build a session from the parsed connection arguments.
    pub fn to_session(&self) -> ZosmfSession {
        ZosmfSession {
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone(),
            token: self.token.clone(),
            secure: !self.no_tls,
            validate_certificates: !self.insecure,
            base_path: self.base_path.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

/// Optional address-space start parameters.
#[derive(Args, Debug, Clone, Default)]
pub struct StartArgs {
    /// Logon procedure (default IZUFPROC)
    #[arg(long)]
    pub logon_procedure: Option<String>,

    /// Character set (default 697)
    #[arg(long)]
    pub character_set: Option<String>,

    /// Code page (default 1047)
    #[arg(long)]
    pub code_page: Option<String>,

    /// Screen rows (default 24)
    #[arg(long)]
    pub rows: Option<String>,

    /// Screen columns (default 80)
    #[arg(long)]
    pub columns: Option<String>,

    /// Region size (default 4096)
    #[arg(long)]
    pub region_size: Option<String>,
}

impl StartArgs {
    /// Convert to SDK start parameters, or `None` when nothing was set.
    pub fn to_parameters(&self) -> Option<zosmf_client::tso::StartParameters> {
        let parameters = zosmf_client::tso::StartParameters {
            logon_procedure: self.logon_procedure.clone(),
            character_set: self.character_set.clone(),
            code_page: self.code_page.clone(),
            rows: self.rows.clone(),
            columns: self.columns.clone(),
            region_size: self.region_size.clone(),
        };
        (parameters != zosmf_client::tso::StartParameters::default()).then_some(parameters)
    }
}
