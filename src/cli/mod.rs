//! Command-line surface: `init`, `add`, and `list`.

mod add;
mod init;
mod list;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::registry::source::{DEFAULT_REGISTRY_URL, RegistryClient};

pub use add::AddArgs;
pub use init::InitArgs;
pub use list::ListArgs;

#[derive(Parser, Debug)]
#[command(
    name = "spaceui",
    version,
    about = "Add Space Invoices UI components to your project"
)]
pub struct Cli {
    /// Read the registry from a local directory instead of the network
    #[arg(long, global = true, value_name = "PATH")]
    pub local: Option<PathBuf>,

    /// Remote registry base URL
    #[arg(long, global = true, value_name = "URL", default_value = DEFAULT_REGISTRY_URL)]
    pub registry: String,

    /// Project directory to operate in (default: current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a spaceui.json with your directory aliases
    Init(InitArgs),

    /// Add components (and their dependencies) to your project
    Add(AddArgs),

    /// List the components available in the registry
    List(ListArgs),
}

/// Dispatch a parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let project_root = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let client = match cli.local {
        Some(path) => RegistryClient::local(path),
        None => RegistryClient::remote(&cli.registry),
    };

    match cli.command {
        Command::Init(args) => init::run(args, &project_root),
        Command::Add(args) => add::run(args, &client, &project_root).await,
        Command::List(args) => list::run(args, &client).await,
    }
}
