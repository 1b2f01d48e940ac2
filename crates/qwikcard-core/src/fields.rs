//! Editable profile draft: the name plus a typed, deduplicated field list.

use qwikcard_protocol::{CreateProfileRequest, FieldPayload};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry::FieldType;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactField {
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub value: String,
}

impl ContactField {
    pub fn new(kind: FieldType, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Placeholder shown while the value is still empty.
    pub fn placeholder(&self) -> &'static str {
        self.kind.display_label()
    }

    pub fn to_payload(&self) -> FieldPayload {
        FieldPayload::new(self.kind.as_str(), self.value.clone())
    }
}

/// Ordered contact fields, at most one per [`FieldType`].
///
/// Edits happen in place; insertion order is display order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileFieldSet {
    fields: Vec<ContactField>,
}

impl ProfileFieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The set a fresh draft starts with: empty phone and email entries.
    pub fn seeded() -> Self {
        let mut set = Self::new();
        set.add(FieldType::Phone, "");
        set.add(FieldType::Email, "");
        set
    }

    /// Append a field of `kind` unless one is already present.
    ///
    /// Returns whether the set changed. Adding a present type is a no-op so
    /// callers may repeat the call freely.
    pub fn add(&mut self, kind: FieldType, initial_value: impl Into<String>) -> bool {
        if self.contains(kind) {
            return false;
        }
        self.fields.push(ContactField::new(kind, initial_value));
        true
    }

    /// Like [`add`](Self::add) for a raw type token; unknown tokens are ignored.
    pub fn add_token(&mut self, token: &str, initial_value: impl Into<String>) -> bool {
        match FieldType::from_token(token) {
            Some(kind) => self.add(kind, initial_value),
            None => false,
        }
    }

    /// Replace the value at `index`, keeping its type and position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn update(&mut self, index: usize, new_value: impl Into<String>) {
        self.fields[index].value = new_value.into();
    }

    /// Remove the field at `index`, shifting later fields down.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> ContactField {
        self.fields.remove(index)
    }

    pub fn position(&self, kind: FieldType) -> Option<usize> {
        self.fields.iter().position(|f| f.kind == kind)
    }

    pub fn contains(&self, kind: FieldType) -> bool {
        self.position(kind).is_some()
    }

    pub fn get(&self, index: usize) -> Option<&ContactField> {
        self.fields.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContactField> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Types that can still be added, in registry order.
    pub fn available_types(&self) -> Vec<FieldType> {
        FieldType::ALL
            .into_iter()
            .filter(|kind| !self.contains(*kind))
            .collect()
    }

    /// Fields with a non-empty value, in display order. This is exactly the
    /// `fields` payload of a create request.
    pub fn to_submittable(&self) -> Vec<ContactField> {
        self.fields
            .iter()
            .filter(|f| !f.value.is_empty())
            .cloned()
            .collect()
    }
}

impl<'a> IntoIterator for &'a ProfileFieldSet {
    type Item = &'a ContactField;
    type IntoIter = std::slice::Iter<'a, ContactField>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("a name is required")]
    NameRequired,
}

/// An unsaved profile owned by one editing session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub fields: ProfileFieldSet,
}

impl ProfileDraft {
    /// A draft with the default seed fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: ProfileFieldSet::seeded(),
        }
    }

    pub fn with_fields(name: impl Into<String>, fields: ProfileFieldSet) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Set the value for `kind`, adding the field when it is missing.
    pub fn set_field(&mut self, kind: FieldType, value: impl Into<String>) {
        let value = value.into();
        match self.fields.position(kind) {
            Some(index) => self.fields.update(index, value),
            None => {
                self.fields.add(kind, value);
            }
        }
    }

    /// A whitespace-only name counts as missing.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::NameRequired);
        }
        Ok(())
    }

    /// Serialize into the create-profile payload, dropping empty fields.
    pub fn to_request(&self) -> CreateProfileRequest {
        CreateProfileRequest {
            name: self.name.clone(),
            fields: self
                .fields
                .to_submittable()
                .iter()
                .map(ContactField::to_payload)
                .collect(),
        }
    }
}
