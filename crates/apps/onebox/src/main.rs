//! Onebox - command-line front-end for the Onebox mail client
//!
//! This is the main entry point for the onebox binary.

use clap::{Parser, Subcommand};
use log::error;

mod app;

use app::OneboxApp;

/// Onebox -- inbox, replies and API tester from the terminal.
#[derive(Parser, Debug)]
#[command(name = "onebox", version, about)]
struct Cli {
    /// Override the environment (development or production)
    #[arg(long, global = true)]
    env: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the Google login page in the browser
    Login {
        /// Origin the login flow redirects back to
        #[arg(long, default_value = "http://localhost:3000")]
        origin: String,
    },

    /// Complete login from the callback URL (or its query string)
    Callback {
        #[arg(default_value = "")]
        url: String,
    },

    /// Forget the stored credential
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List inbox threads
    List,

    /// Show one thread with suggested tags
    Show { id: String },

    /// Delete a thread
    Delete { id: String },

    /// Reply to a thread (uses the saved draft when no body is given)
    Reply {
        id: String,

        /// Reply body (HTML allowed)
        #[arg(long)]
        body: Option<String>,
    },

    /// Manage reply drafts
    Draft {
        #[command(subcommand)]
        action: DraftCommands,
    },

    /// Show or change the theme preference
    Theme {
        /// light, dark or toggle
        value: Option<String>,
    },

    /// Send a request straight to an endpoint, bypassing mock data
    Request {
        /// Absolute endpoint URL (defaults to the thread list endpoint)
        endpoint: Option<String>,

        /// HTTP method
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,

        /// Do not route through the CORS relay
        #[arg(long)]
        no_relay: bool,

        /// JSON body for POST, PUT and PATCH
        #[arg(short, long)]
        data: Option<String>,

        /// Extra header as 'Key: value' (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
enum DraftCommands {
    /// Save a draft for a thread
    Save { id: String, content: String },
    /// Print the saved draft
    Show { id: String },
    /// Delete the saved draft
    Discard { id: String },
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    // Bootstrap config directory
    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    let cli = Cli::parse();

    let result = OneboxApp::new(cli.env.as_deref()).and_then(|app| app.run(cli.command));
    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
