//! Page-to-cards visibility broadcast.
//!
//! The page owns one [`VisibilityBroadcast`]; each card owns one
//! [`CardVisibility`]. The page hands every card the current
//! [`BroadcastCommand`] while a broadcast runs, cards report back with
//! [`VisibilityBroadcast::mark_applied`], and the page finishes the cycle
//! with [`VisibilityBroadcast::settle`] once every card has answered.
//! Reports may arrive in any order; only their number matters.

use std::time::Duration;

use vocab_core::model::{VisibilityField, VisibilitySettings};

/// How long a card waits after adopting settings before reporting back.
pub const CARD_APPLY_DELAY: Duration = Duration::from_millis(100);

/// How long the page waits after the last report before leaving apply mode.
pub const SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Settings pushed to every card for one broadcast cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BroadcastCommand {
    pub cycle: u64,
    pub settings: VisibilitySettings,
}

/// What the page should do after feeding the aggregator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BroadcastStep {
    /// Still waiting for reports.
    Waiting { applied: usize, total: usize },
    /// Every card has reported; call `settle(cycle)` after [`SETTLE_DELAY`].
    Complete { cycle: u64 },
    /// Nothing changed (stale cycle, duplicate completion, not applying).
    Ignored,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityBroadcast {
    desired: VisibilitySettings,
    is_applying: bool,
    applied_count: usize,
    total: usize,
    cycle: u64,
    completion_sent: bool,
}

impl VisibilityBroadcast {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn desired(&self) -> VisibilitySettings {
        self.desired
    }

    #[must_use]
    pub fn is_applying(&self) -> bool {
        self.is_applying
    }

    #[must_use]
    pub fn applied_count(&self) -> usize {
        self.applied_count
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Settings every card should adopt, only while a broadcast runs.
    #[must_use]
    pub fn command(&self) -> Option<BroadcastCommand> {
        self.is_applying.then_some(BroadcastCommand {
            cycle: self.cycle,
            settings: self.desired,
        })
    }

    /// Start a new cycle for `total` mounted cards.
    ///
    /// Any unfinished earlier cycle is abandoned; its late reports are
    /// ignored. With no cards the cycle is complete at once.
    pub fn begin(&mut self, settings: VisibilitySettings, total: usize) -> BroadcastStep {
        self.cycle += 1;
        self.desired = settings;
        self.is_applying = true;
        self.applied_count = 0;
        self.total = total;
        self.completion_sent = false;
        self.check_complete()
    }

    /// Record one card's report for `cycle`.
    pub fn mark_applied(&mut self, cycle: u64) -> BroadcastStep {
        if !self.is_applying || cycle != self.cycle {
            return BroadcastStep::Ignored;
        }
        self.applied_count = (self.applied_count + 1).min(self.total);
        self.check_complete()
    }

    /// The number of mounted cards changed mid-cycle.
    pub fn sync_total(&mut self, total: usize) -> BroadcastStep {
        if self.total == total {
            return BroadcastStep::Ignored;
        }
        self.total = total;
        if !self.is_applying {
            return BroadcastStep::Ignored;
        }
        self.applied_count = self.applied_count.min(total);
        self.check_complete()
    }

    /// Leave apply mode if `cycle` is still the current one.
    pub fn settle(&mut self, cycle: u64) -> bool {
        if self.is_applying && self.completion_sent && cycle == self.cycle {
            self.is_applying = false;
            true
        } else {
            false
        }
    }

    fn check_complete(&mut self) -> BroadcastStep {
        if self.applied_count < self.total {
            return BroadcastStep::Waiting {
                applied: self.applied_count,
                total: self.total,
            };
        }
        if self.completion_sent {
            return BroadcastStep::Ignored;
        }
        self.completion_sent = true;
        BroadcastStep::Complete { cycle: self.cycle }
    }
}

/// One card's own visibility state.
///
/// Direct toggles and broadcasts both write the same value, so whatever a
/// broadcast left behind stays in place afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CardVisibility {
    settings: VisibilitySettings,
    adopted_cycle: Option<u64>,
}

impl CardVisibility {
    #[must_use]
    pub fn settings(&self) -> VisibilitySettings {
        self.settings
    }

    #[must_use]
    pub fn is_visible(&self, field: VisibilityField) -> bool {
        self.settings.is_visible(field)
    }

    pub fn toggle(&mut self, field: VisibilityField) {
        self.settings = self.settings.toggled(field);
    }

    /// Adopt a broadcast. Returns `true` the first time a cycle is seen, in
    /// which case the card owes the page one report.
    pub fn adopt(&mut self, command: BroadcastCommand) -> bool {
        if self.adopted_cycle == Some(command.cycle) {
            return false;
        }
        self.settings = command.settings;
        self.adopted_cycle = Some(command.cycle);
        true
    }
}
