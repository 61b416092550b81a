/// One diagnostic event observed while resolving a run
///
/// Returned to callers instead of being printed, so services can log them
/// and tests can assert on them.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionEvent {
    /// A duplicate entry folded into an existing record with no field changes
    DuplicateFolded { player: String, tournament: String },
    /// An active record was flipped to withdrawn by a later source
    WithdrawalFlipped {
        player: String,
        tournament: String,
        source: String,
    },
    /// A withdrawn record adopted a more specific reason during the fold
    ReasonAdopted { player: String, tournament: String },
    /// An authoritative reason was attached to an already-known withdrawal
    ReasonAttached { player: String, tournament: String },
    /// An abbreviated authoritative name was resolved to a full name
    NameExpanded { from: String, to: String },
    /// An authoritative record could not be expanded and was discarded
    ExpansionDiscarded { name: String },
    /// A lower-section withdrawal was removed in favor of a higher active entry
    PromotionStripped {
        player: String,
        tournament: String,
        section: String,
    },
}

/// Collected diagnostics for one resolved run
#[derive(Debug, Default)]
pub struct ResolutionReport {
    pub events: Vec<ResolutionEvent>,
}

impl ResolutionReport {
    pub fn record(&mut self, event: ResolutionEvent) {
        self.events.push(event);
    }

    pub fn duplicates_folded(&self) -> usize {
        self.count(|e| matches!(e, ResolutionEvent::DuplicateFolded { .. }))
    }

    pub fn withdrawals_flipped(&self) -> usize {
        self.count(|e| matches!(e, ResolutionEvent::WithdrawalFlipped { .. }))
    }

    pub fn reasons_adopted(&self) -> usize {
        self.count(|e| matches!(e, ResolutionEvent::ReasonAdopted { .. }))
    }

    pub fn reasons_attached(&self) -> usize {
        self.count(|e| matches!(e, ResolutionEvent::ReasonAttached { .. }))
    }

    pub fn names_expanded(&self) -> usize {
        self.count(|e| matches!(e, ResolutionEvent::NameExpanded { .. }))
    }

    pub fn expansions_discarded(&self) -> usize {
        self.count(|e| matches!(e, ResolutionEvent::ExpansionDiscarded { .. }))
    }

    pub fn promotions_stripped(&self) -> usize {
        self.count(|e| matches!(e, ResolutionEvent::PromotionStripped { .. }))
    }

    fn count(&self, pred: impl Fn(&ResolutionEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}
