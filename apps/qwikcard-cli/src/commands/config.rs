use anyhow::Result;
use clap::{Args, Subcommand};
use qwikcard_core::config_schema_json;

use crate::util::{resolve_config, GlobalArgs};

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Print the configuration JSON schema
    Schema(PrettyArgs),
    /// Print the effective configuration (file, environment and flags applied)
    Show(PrettyArgs),
}

#[derive(Args)]
pub struct PrettyArgs {
    /// Pretty-print JSON
    #[arg(long)]
    pub pretty: bool,
}

pub fn execute(global: &GlobalArgs, cmd: ConfigCmd) -> Result<()> {
    let (value, pretty) = match cmd {
        ConfigCmd::Schema(args) => (config_schema_json(), args.pretty),
        ConfigCmd::Show(args) => (serde_json::to_value(resolve_config(global)?)?, args.pretty),
    };
    if pretty {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", value);
    }
    Ok(())
}
