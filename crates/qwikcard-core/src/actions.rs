//! Field value to action link resolution.
//!
//! Every [`FieldType`] maps to a pure [`LinkBuilder`]; resolving a field is a
//! table lookup followed by a call, so identical inputs always produce the
//! same ordered links. Values are not validated: an empty or malformed value
//! still goes through the same construction rule.

use serde::Serialize;

use crate::registry::FieldType;

/// What activating a link does on the viewer's device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkKind {
    Navigate,
    DialLike,
    MailLike,
    PayLike,
    Download,
}

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Navigate => "navigate",
            LinkKind::DialLike => "dial-like",
            LinkKind::MailLike => "mail-like",
            LinkKind::PayLike => "pay-like",
            LinkKind::Download => "download",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActionLink {
    pub label: String,
    pub href: String,
    pub kind: LinkKind,
}

impl ActionLink {
    fn new(label: &str, href: String, kind: LinkKind) -> Self {
        Self {
            label: label.to_string(),
            href,
            kind,
        }
    }
}

/// Inputs a link rule may need besides the field value.
#[derive(Clone, Copy, Debug)]
pub struct LinkContext<'a> {
    /// Base URL of the profile service, without trailing slash.
    pub api_base: &'a str,
    pub profile_id: &'a str,
}

/// Construction rule for one field type.
pub type LinkBuilder = fn(&str, &LinkContext<'_>) -> Vec<ActionLink>;

const MESSAGING_BASE: &str = "https://wa.me/";
const LINKEDIN_BASE: &str = "https://www.linkedin.com/in/";
const GITHUB_BASE: &str = "https://github.com/";
const TWITTER_BASE: &str = "https://twitter.com/";
const INSTAGRAM_BASE: &str = "https://www.instagram.com/";

/// Resolves fields of a stored profile into action links.
#[derive(Clone, Debug)]
pub struct ActionResolver {
    api_base: String,
}

impl ActionResolver {
    /// `api_base` is the profile service base URL; it is used for the
    /// save-contact link.
    pub fn new(api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self { api_base }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn resolve(&self, kind: FieldType, value: &str, profile_id: &str) -> Vec<ActionLink> {
        let ctx = LinkContext {
            api_base: &self.api_base,
            profile_id,
        };
        (kind.link_builder())(value, &ctx)
    }

    /// Resolve by raw wire token. Tokens outside the registry produce no links.
    pub fn resolve_token(&self, token: &str, value: &str, profile_id: &str) -> Vec<ActionLink> {
        match FieldType::from_token(token) {
            Some(kind) => self.resolve(kind, value, profile_id),
            None => {
                tracing::debug!(token, "no link rule for field type");
                Vec::new()
            }
        }
    }
}

fn is_absolute_web_uri(value: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        value
            .get(..scheme.len())
            .map(|head| head.eq_ignore_ascii_case(scheme))
            .unwrap_or(false)
    })
}

fn profile_on(base: &str, value: &str) -> Vec<ActionLink> {
    let href = if is_absolute_web_uri(value) {
        value.to_string()
    } else {
        format!("{base}{value}")
    };
    vec![ActionLink::new("View Profile", href, LinkKind::Navigate)]
}

pub(crate) fn website_links(value: &str, _ctx: &LinkContext<'_>) -> Vec<ActionLink> {
    let href = if is_absolute_web_uri(value) {
        value.to_string()
    } else {
        format!("https://{value}")
    };
    vec![ActionLink::new("Visit Website", href, LinkKind::Navigate)]
}

pub(crate) fn linkedin_links(value: &str, _ctx: &LinkContext<'_>) -> Vec<ActionLink> {
    profile_on(LINKEDIN_BASE, value)
}

pub(crate) fn github_links(value: &str, _ctx: &LinkContext<'_>) -> Vec<ActionLink> {
    profile_on(GITHUB_BASE, value)
}

pub(crate) fn twitter_links(value: &str, _ctx: &LinkContext<'_>) -> Vec<ActionLink> {
    profile_on(TWITTER_BASE, value)
}

pub(crate) fn instagram_links(value: &str, _ctx: &LinkContext<'_>) -> Vec<ActionLink> {
    profile_on(INSTAGRAM_BASE, value)
}

/// Messaging link first, save-contact second. The vCard is composed by the
/// service from the whole profile, so the link carries the profile id only.
pub(crate) fn phone_links(value: &str, ctx: &LinkContext<'_>) -> Vec<ActionLink> {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    let vcard = format!(
        "{}{}",
        ctx.api_base,
        qwikcard_protocol::vcard_path(ctx.profile_id)
    );
    vec![
        ActionLink::new(
            "Chat on WhatsApp",
            format!("{MESSAGING_BASE}{digits}"),
            LinkKind::DialLike,
        ),
        ActionLink::new("Save Contact", vcard, LinkKind::Download),
    ]
}

pub(crate) fn email_links(value: &str, _ctx: &LinkContext<'_>) -> Vec<ActionLink> {
    vec![ActionLink::new(
        "Send Email",
        format!("mailto:{value}"),
        LinkKind::MailLike,
    )]
}

pub(crate) fn upi_links(value: &str, _ctx: &LinkContext<'_>) -> Vec<ActionLink> {
    vec![ActionLink::new(
        "Pay with UPI",
        format!("upi://pay?pa={value}"),
        LinkKind::PayLike,
    )]
}
