use anyhow::{bail, Result};
use clap::Args;
use qwikcard_core::{
    ActionResolver, Config, HttpProfileStore, ProfileViewer, ResolvedProfile, ViewState,
};

#[derive(Args, Clone)]
pub struct ShowArgs {
    /// Profile identifier (the last segment of the profile link)
    pub profile_id: String,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(config: &Config, args: &ShowArgs) -> Result<()> {
    let store = HttpProfileStore::new(&config.service)?;
    let resolver = ActionResolver::new(config.service.api_base_url.clone());
    let mut viewer = ProfileViewer::new(store, resolver);
    let profile = match viewer.load(&args.profile_id).await {
        ViewState::Loaded(profile) => profile,
        ViewState::Error(message) => bail!("{}", message),
        ViewState::Loading => bail!("profile still loading"),
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(profile)?);
    } else {
        print!("{}", render_text(profile));
    }
    Ok(())
}

pub(crate) fn render_text(profile: &ResolvedProfile) -> String {
    let mut out = format!("{}\n", profile.name);
    for field in &profile.fields {
        out.push_str(&format!("  {}: {}\n", field.kind, field.value));
        for link in &field.links {
            out.push_str(&format!("    {} -> {}\n", link.label, link.href));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use qwikcard_core::{FieldType, ResolvedField};

    #[test]
    fn text_lists_fields_with_links() {
        let resolver = ActionResolver::new("http://127.0.0.1:8000");
        let profile = ResolvedProfile {
            id: "abc".into(),
            name: "Ada".into(),
            fields: vec![
                ResolvedField {
                    kind: "email".into(),
                    value: "ada@example.com".into(),
                    links: resolver.resolve(FieldType::Email, "ada@example.com", "abc"),
                },
                ResolvedField {
                    kind: "fax".into(),
                    value: "123".into(),
                    links: Vec::new(),
                },
            ],
        };
        assert_eq!(
            render_text(&profile),
            "Ada\n  email: ada@example.com\n    Send Email -> mailto:ada@example.com\n  fax: 123\n"
        );
    }
}
