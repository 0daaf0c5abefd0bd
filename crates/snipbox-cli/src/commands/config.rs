//! `snipbox config`: read and edit the TOML settings file

use clap::{Args, Subcommand};

use crate::config::{config_file_path, Config};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting
    Get { key: String },
    /// Change one setting and write the file
    Set { key: String, value: String },
    /// Print every setting as TOML
    List,
    /// Print where the settings file lives
    Path,
    /// Write the built-in defaults to the settings file
    Init {
        /// Replace a file that is already there
        #[arg(long)]
        force: bool,
    },
}

/// Execute a config action and return what should be printed
fn execute(action: &ConfigAction) -> anyhow::Result<String> {
    let path = config_file_path();

    match action {
        ConfigAction::Get { key } => Config::load().get(key).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown config key: {} (available: {})",
                key,
                Config::keys().join(", ")
            )
        }),
        ConfigAction::Set { key, value } => {
            let mut config = Config::load();
            config.set(key, value)?;
            config.save()?;
            Ok(format!("{} = {} ({})", key, value, path.display()))
        }
        ConfigAction::List => {
            let rendered = toml::to_string_pretty(&Config::load())?;
            Ok(format!("# {}\n{}", path.display(), rendered.trim_end()))
        }
        ConfigAction::Path => Ok(path.display().to_string()),
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists; pass --force to replace it",
                    path.display()
                );
            }
            Config::default().save()?;
            Ok(format!("Wrote default settings to {}", path.display()))
        }
    }
}

pub async fn run(args: &ConfigArgs) -> anyhow::Result<()> {
    println!("{}", execute(&args.action)?);
    Ok(())
}
