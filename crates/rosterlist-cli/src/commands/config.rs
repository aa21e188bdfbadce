use clap::Subcommand;
use rosterlist_core::Config;

use super::Context;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "reset.reset_hour", "app_name")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(ctx: &Context, action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = ctx.load_config()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = ctx.load_config()?;
            config.set(&key, &value)?;
            ctx.save_config(&config)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = ctx.load_config()?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            ctx.save_config(&Config::default())?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
