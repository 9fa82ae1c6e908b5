mod comparisons;
mod flashcard_item;
mod memorization;
mod state;
mod visibility_controls;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use comparisons::ComparisonsView;
pub use flashcard_item::FlashcardItem;
pub use memorization::MemorizationView;
pub use state::{ViewError, ViewState, use_watch, view_state_from_resource};
pub use visibility_controls::VisibilityControls;
