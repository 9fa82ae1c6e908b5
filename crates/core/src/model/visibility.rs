use serde::{Deserialize, Serialize};

/// A displayable field group on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisibilityField {
    Word,
    Image,
    Meanings,
    Examples,
    Explanation,
}

impl VisibilityField {
    pub const ALL: [Self; 5] = [
        Self::Word,
        Self::Image,
        Self::Meanings,
        Self::Examples,
        Self::Explanation,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Word => "Word",
            Self::Image => "Image",
            Self::Meanings => "Meanings",
            Self::Examples => "Examples",
            Self::Explanation => "Explanation",
        }
    }
}

/// Show/hide flag per field group. Defaults to everything visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct VisibilitySettings {
    pub word: bool,
    pub image: bool,
    pub meanings: bool,
    pub examples: bool,
    pub explanation: bool,
}

impl Default for VisibilitySettings {
    fn default() -> Self {
        Self::all_visible()
    }
}

impl VisibilitySettings {
    #[must_use]
    pub const fn all_visible() -> Self {
        Self {
            word: true,
            image: true,
            meanings: true,
            examples: true,
            explanation: true,
        }
    }

    #[must_use]
    pub const fn all_hidden() -> Self {
        Self {
            word: false,
            image: false,
            meanings: false,
            examples: false,
            explanation: false,
        }
    }

    #[must_use]
    pub const fn is_visible(&self, field: VisibilityField) -> bool {
        match field {
            VisibilityField::Word => self.word,
            VisibilityField::Image => self.image,
            VisibilityField::Meanings => self.meanings,
            VisibilityField::Examples => self.examples,
            VisibilityField::Explanation => self.explanation,
        }
    }

    #[must_use]
    pub const fn with(mut self, field: VisibilityField, visible: bool) -> Self {
        match field {
            VisibilityField::Word => self.word = visible,
            VisibilityField::Image => self.image = visible,
            VisibilityField::Meanings => self.meanings = visible,
            VisibilityField::Examples => self.examples = visible,
            VisibilityField::Explanation => self.explanation = visible,
        }
        self
    }

    #[must_use]
    pub const fn toggled(self, field: VisibilityField) -> Self {
        let visible = self.is_visible(field);
        self.with(field, !visible)
    }
}
