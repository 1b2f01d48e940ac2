use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use clap::Args;
use qwikcard_core::{Config, FieldType, HexColor, HttpProfileStore, ProfileDraft, SubmissionFlow};
use serde_json::json;

use crate::code;
use crate::commands::export::save_png;

/// `type=value` pair from the command line. The type is kept raw so unknown
/// types can be reported instead of rejected by the parser.
#[derive(Clone, Debug)]
pub struct FieldArg {
    pub kind: String,
    pub value: String,
}

impl FromStr for FieldArg {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (kind, value) = input
            .split_once('=')
            .ok_or_else(|| "fields must be in type=value format".to_string())?;
        let kind = kind.trim();
        if kind.is_empty() {
            return Err("field type cannot be empty".into());
        }
        Ok(FieldArg {
            kind: kind.to_ascii_lowercase(),
            value: value.to_string(),
        })
    }
}

#[derive(Args, Clone)]
pub struct CreateArgs {
    /// Full name shown on the profile (required)
    #[arg(long, default_value = "")]
    pub name: String,
    /// Contact field as type=value; repeat for more (e.g. --field github=octocat)
    #[arg(long = "field", value_name = "TYPE=VALUE")]
    pub fields: Vec<FieldArg>,
    /// Code colour (#RGB or #RRGGBB)
    #[arg(long)]
    pub fg: Option<HexColor>,
    /// Background colour (#RGB or #RRGGBB)
    #[arg(long)]
    pub bg: Option<HexColor>,
    /// Directory the PNG is written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
    /// Skip writing the QR code PNG
    #[arg(long)]
    pub no_export: bool,
    /// Print a JSON summary
    #[arg(long)]
    pub json: bool,
}

pub(crate) fn build_draft(args: &CreateArgs) -> ProfileDraft {
    let mut draft = ProfileDraft::new(args.name.clone());
    for field in &args.fields {
        match FieldType::from_token(&field.kind) {
            Some(kind) => draft.set_field(kind, field.value.clone()),
            None => {
                tracing::warn!(field_type = %field.kind, "ignoring unknown field type");
                eprintln!("Skipping unknown field type '{}'", field.kind);
            }
        }
    }
    draft
}

pub async fn execute(config: &Config, args: &CreateArgs) -> Result<()> {
    let draft = build_draft(args);
    let store = HttpProfileStore::new(&config.service)?;
    let mut flow = SubmissionFlow::new(store, config.service.public_origin.clone());
    let profile_id = flow.submit(&draft).await?;
    let url = flow
        .profile_url()
        .ok_or_else(|| anyhow!("profile created without a shareable link"))?;

    let foreground = args.fg.unwrap_or(config.export.foreground);
    let background = args.bg.unwrap_or(config.export.background);
    let mut saved: Option<PathBuf> = None;
    if !args.no_export {
        let exported = code::render_svg(&url, foreground, background)
            .and_then(|svg| save_png(config, &svg, background, &draft.name, &args.out_dir));
        match exported {
            Ok(path) => saved = Some(path),
            // The profile exists either way; only the download failed.
            Err(err) => eprintln!("{:#}", err),
        }
    }

    if args.json {
        let summary = json!({
            "profile_id": profile_id,
            "url": url,
            "png": saved.as_ref().map(|p| p.display().to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("QR Code ready! {}", url);
        if let Some(path) = saved {
            println!("Saved {}", path.display());
        }
    }
    Ok(())
}
