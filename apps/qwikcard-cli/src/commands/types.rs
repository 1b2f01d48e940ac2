use anyhow::Result;
use clap::Args;
use qwikcard_core::all_types;
use serde_json::json;

#[derive(Args, Default, Clone, Copy)]
pub struct TypesArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: &TypesArgs) -> Result<()> {
    if args.json {
        let items: Vec<_> = all_types()
            .iter()
            .map(|kind| json!({"type": kind.as_str(), "label": kind.display_label()}))
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }
    for kind in all_types() {
        println!("{:<10} {}", kind.as_str(), kind.display_label());
    }
    Ok(())
}
