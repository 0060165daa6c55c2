//! Gesture payload container.

/// Content type marking a project-id payload.
pub const PLAIN_TEXT_MARKER: &str = "text/plain";

/// Effects a drag source permits at the drop site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Link,
    Move,
}

/// Key/value payload of one drag gesture.
///
/// Entries keep insertion order; `types()[0]` is the declared content type
/// targets inspect on drag-over.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataTransfer {
    entries: Vec<(String, String)>,
    effect_allowed: DropEffect,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a transfer holding one entry, e.g. for drags from outside the board.
    pub fn with_data(content_type: impl Into<String>, data: impl Into<String>) -> Self {
        let mut transfer = Self::new();
        transfer.set_data(content_type, data);
        transfer
    }

    /// Stores `data` under `content_type`, replacing an existing entry in place.
    pub fn set_data(&mut self, content_type: impl Into<String>, data: impl Into<String>) {
        let content_type = content_type.into();
        let data = data.into();
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| *existing == content_type)
        {
            Some(entry) => entry.1 = data,
            None => self.entries.push((content_type, data)),
        }
    }

    pub fn get_data(&self, content_type: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == content_type)
            .map(|(_, data)| data.as_str())
    }

    /// Declared content types in insertion order.
    pub fn types(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|(content_type, _)| content_type.as_str())
            .collect()
    }

    /// Whether the first declared type is the plain-text marker.
    pub fn declares_plain_text(&self) -> bool {
        self.entries
            .first()
            .is_some_and(|(content_type, _)| content_type == PLAIN_TEXT_MARKER)
    }

    pub fn effect_allowed(&self) -> DropEffect {
        self.effect_allowed
    }

    pub fn set_effect_allowed(&mut self, effect: DropEffect) {
        self.effect_allowed = effect;
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.effect_allowed = DropEffect::None;
    }
}
