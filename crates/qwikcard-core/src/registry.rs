//! Known contact field types and the link rule each one carries.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::actions::{self, LinkBuilder};

/// Closed set of contact field types a profile can hold.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Phone,
    Email,
    Website,
    Linkedin,
    Github,
    Twitter,
    Instagram,
    Upi,
}

impl FieldType {
    /// Registry order; also the order of the "add another field" menu.
    pub const ALL: [FieldType; 8] = [
        FieldType::Phone,
        FieldType::Email,
        FieldType::Website,
        FieldType::Linkedin,
        FieldType::Github,
        FieldType::Twitter,
        FieldType::Instagram,
        FieldType::Upi,
    ];

    /// Wire token as stored by the profile service.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Phone => "phone",
            FieldType::Email => "email",
            FieldType::Website => "website",
            FieldType::Linkedin => "linkedin",
            FieldType::Github => "github",
            FieldType::Twitter => "twitter",
            FieldType::Instagram => "instagram",
            FieldType::Upi => "upi",
        }
    }

    /// Capitalized type name, used for placeholders and menus.
    pub fn display_label(self) -> &'static str {
        match self {
            FieldType::Phone => "Phone",
            FieldType::Email => "Email",
            FieldType::Website => "Website",
            FieldType::Linkedin => "Linkedin",
            FieldType::Github => "Github",
            FieldType::Twitter => "Twitter",
            FieldType::Instagram => "Instagram",
            FieldType::Upi => "Upi",
        }
    }

    /// Parse a wire token. Unknown tokens yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL.into_iter().find(|kind| kind.as_str() == token)
    }

    /// Link construction rule for this type.
    pub fn link_builder(self) -> LinkBuilder {
        match self {
            FieldType::Phone => actions::phone_links,
            FieldType::Email => actions::email_links,
            FieldType::Website => actions::website_links,
            FieldType::Linkedin => actions::linkedin_links,
            FieldType::Github => actions::github_links,
            FieldType::Twitter => actions::twitter_links,
            FieldType::Instagram => actions::instagram_links,
            FieldType::Upi => actions::upi_links,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field type: {0}")]
pub struct UnknownFieldType(pub String);

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| UnknownFieldType(s.to_string()))
    }
}

/// Whether `token` names a known field type.
pub fn is_known_type(token: &str) -> bool {
    FieldType::from_token(token).is_some()
}

/// All field types in registry order.
pub fn all_types() -> &'static [FieldType] {
    &FieldType::ALL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip() {
        for kind in all_types() {
            assert_eq!(FieldType::from_token(kind.as_str()), Some(*kind));
            assert_eq!(kind.as_str().parse::<FieldType>(), Ok(*kind));
        }
    }

    #[test]
    fn labels_are_capitalized_tokens() {
        for kind in all_types() {
            let token = kind.as_str();
            let mut expected = token[..1].to_ascii_uppercase();
            expected.push_str(&token[1..]);
            assert_eq!(kind.display_label(), expected);
        }
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert!(!is_known_type("fax"));
        assert!(!is_known_type("Phone"));
        assert!(!is_known_type(""));
        assert!(is_known_type(" upi "));
        assert_eq!(
            "myspace".parse::<FieldType>(),
            Err(UnknownFieldType("myspace".into()))
        );
    }

    #[test]
    fn registry_order_is_stable() {
        let tokens: Vec<_> = all_types().iter().map(|k| k.as_str()).collect();
        assert_eq!(
            tokens,
            [
                "phone",
                "email",
                "website",
                "linkedin",
                "github",
                "twitter",
                "instagram",
                "upi"
            ]
        );
    }

    #[test]
    fn serde_uses_wire_tokens() {
        let json = serde_json::to_string(&FieldType::Linkedin).expect("serialize");
        assert_eq!(json, "\"linkedin\"");
        let back: FieldType = serde_json::from_str("\"upi\"").expect("deserialize");
        assert_eq!(back, FieldType::Upi);
    }
}
