//! `spaceui init`: write the project's alias configuration.

use std::path::Path;

use clap::Args;

use crate::config::{CONFIG_FILE_NAME, Config};
use crate::prompts::{confirm, input, print_header, print_info, print_success};

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Accept the default aliases without prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Overwrite an existing configuration
    #[arg(short, long)]
    pub force: bool,
}

pub fn run(args: InitArgs, project_root: &Path) -> anyhow::Result<()> {
    if Config::exists_in(project_root) && !args.force {
        let replace = confirm(
            &format!("{CONFIG_FILE_NAME} already exists. Replace it?"),
            false,
        )?;
        if !replace {
            print_info("Keeping the existing configuration.");
            return Ok(());
        }
    }

    let mut config = Config::with_defaults();

    if !args.yes {
        print_header("Configure directory aliases");
        print_info("Paths starting with @/ are relative to your src/ directory.");
        config.aliases.components = input("Components", &config.aliases.components)?;
        config.aliases.ui = input("UI primitives", &config.aliases.ui)?;
        config.aliases.lib = input("Utility modules", &config.aliases.lib)?;
        config.aliases.hooks = input("Hooks", &config.aliases.hooks)?;
        config.aliases.providers = input("Providers", &config.aliases.providers)?;
    }

    let path = config.save(project_root)?;
    print_success(&format!("Wrote {}", path.display()));
    print_info("Run `spaceui add <component>` to install your first component.");
    Ok(())
}
