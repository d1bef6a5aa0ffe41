//! CLI commands and argument parsing.

pub mod init;
pub mod login;
pub mod logout;
pub mod publish;

use clap::{Parser, Subcommand};

/// Keryx - publish server manifests to the registry
#[derive(Parser)]
#[command(name = "keryx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Create a server.json template in the current directory
    Init(init::InitArgs),

    /// Authenticate with the registry
    Login(login::LoginArgs),

    /// Clear the saved credential
    Logout,

    /// Validate and publish server.json to the registry
    Publish(publish::PublishArgs),

    /// Print version information
    Version,
}
