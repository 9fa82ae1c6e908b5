mod comparison;
mod flashcard;
mod ids;
mod media;
mod template;
mod visibility;

pub use ids::{
    ComparisonId, FlashcardId, MeaningId, MediaId, ParseIdError, TemplateId, UserId, WordId,
};

pub use comparison::Comparison;
pub use flashcard::{Flashcard, Meaning, Word};
pub use media::{GenerationType, Media};
pub use template::Template;
pub use visibility::{VisibilityField, VisibilitySettings};
