use serde::{Deserialize, Serialize};
use std::fmt;

/// A business or community partner record.
///
/// Field order matches the column order of the persisted CSV file:
/// `name,type,resources,contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub name: String,
    #[serde(rename = "type")]
    pub partner_type: String,
    pub resources: String,
    pub contact: String,
}

impl Partner {
    pub fn new(
        name: impl Into<String>,
        partner_type: impl Into<String>,
        resources: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            partner_type: partner_type.into(),
            resources: resources.into(),
            contact: contact.into(),
        }
    }

    /// Field values in column order.
    pub fn fields(&self) -> [&str; 4] {
        [&self.name, &self.partner_type, &self.resources, &self.contact]
    }

    /// Returns true if `needle` occurs in any field, ignoring case.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl fmt::Display for Partner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Type: {}", self.partner_type)?;
        writeln!(f, "Resources: {}", self.resources)?;
        write!(f, "Contact: {}", self.contact)
    }
}
