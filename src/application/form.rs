//! Modal partner form and the single-line text input it is built from.

use crate::domain::{DomainError, DomainResult, Partner};
use unicode_width::UnicodeWidthStr;

/// A single-line editable text buffer with a cursor.
///
/// The cursor is a character index, so editing works with multi-byte
/// input as well.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    /// Creates an input holding `value` with the cursor at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display width, in terminal columns, of the text before the cursor.
    pub fn cursor_width(&self) -> usize {
        self.value[..self.byte_index(self.cursor)].width()
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

/// What a submitted form does to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    Add,
    /// Replaces the first partner named `original`.
    Edit { original: String },
}

/// Field labels, in form and column order.
pub const FIELD_LABELS: [&str; 4] = ["name", "type", "resources", "contact"];

/// Four-field partner form used for both add and edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerForm {
    pub kind: FormKind,
    pub fields: [TextInput; 4],
    pub focus: usize,
}

impl PartnerForm {
    pub fn for_add() -> Self {
        Self {
            kind: FormKind::Add,
            fields: Default::default(),
            focus: 0,
        }
    }

    /// Pre-filled form for editing `partner`.
    pub fn for_edit(partner: &Partner) -> Self {
        Self {
            kind: FormKind::Edit {
                original: partner.name.clone(),
            },
            fields: partner.fields().map(TextInput::with_value),
            focus: 0,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            FormKind::Add => "Enter the partner details",
            FormKind::Edit { .. } => "Edit the partner details",
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextInput {
        &mut self.fields[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_previous(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Builds the partner if every field holds something besides whitespace.
    ///
    /// Values are kept exactly as typed.
    pub fn validate(&self) -> DomainResult<Partner> {
        let missing: Vec<&'static str> = FIELD_LABELS
            .iter()
            .zip(&self.fields)
            .filter(|(_, input)| input.value().trim().is_empty())
            .map(|(label, _)| *label)
            .collect();

        if !missing.is_empty() {
            return Err(DomainError::Validation { missing });
        }

        let [name, partner_type, resources, contact] = &self.fields;
        Ok(Partner::new(
            name.value(),
            partner_type.value(),
            resources.value(),
            contact.value(),
        ))
    }
}
