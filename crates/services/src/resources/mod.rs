//! One reducer-driven resource per backend concern.
//!
//! Each resource owns a [`Store`](crate::store::Store) and exposes a
//! snapshot (`state`), a change feed (`subscribe`), its operations and
//! `reset_state`. Resources never read each other's state.

pub mod add_flashcard;
pub mod comparison;
pub mod flashcards;
pub mod meanings;
pub mod media;
pub mod templates;
pub mod user;

pub use add_flashcard::{
    AddFlashcardAction, AddFlashcardPhase, AddFlashcardResource, AddFlashcardState,
};
pub use comparison::{ComparisonAction, ComparisonResource, ComparisonState};
pub use flashcards::{FlashcardsAction, FlashcardsResource, FlashcardsState};
pub use meanings::{MeaningsAction, MeaningsResource, MeaningsState};
pub use media::{MediaAction, MediaResource, MediaState};
pub use templates::{TemplatesAction, TemplatesResource, TemplatesState};
pub use user::{UserAction, UserResource, UserState};
