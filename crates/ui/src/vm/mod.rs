mod comparison_vm;
mod flashcard_vm;
mod visibility_vm;

pub use comparison_vm::{ComparisonCardVm, merge_comparisons};
pub use flashcard_vm::{FlashcardVm, MeaningRowVm, map_flashcard, map_flashcards};
pub use visibility_vm::{
    BroadcastCommand, BroadcastStep, CARD_APPLY_DELAY, CardVisibility, SETTLE_DELAY,
    VisibilityBroadcast,
};
