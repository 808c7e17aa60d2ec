//! SelectionState and the greedy selector.
//!
//! The selector grows a selection one source at a time until the cap is hit
//! or the candidate pool runs dry. Picks are permanent within a run.
//!
//! The per-pick gain is a local estimate (`gain_per_trait` × distinct
//! inheritances on the candidate). It ignores what the current selection
//! already covers, so a fully redundant candidate can still win a slot.

use super::catalog::{ReverseIndex, SourceEntry};
use super::scoring::TraitAccumulator;
use rustc_hash::FxHashSet;

/// Chosen sources plus the inheritance tallies they produce.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    anchor: Option<String>,
    picks: Vec<String>,
    accumulator: TraitAccumulator,
}

impl SelectionState {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start from a pinned anchor. An anchor missing from the index grants nothing.
    pub fn with_anchor(anchor: &str, index: &ReverseIndex) -> Self {
        let mut accumulator = TraitAccumulator::new();
        if let Some(entry) = index.get(anchor) {
            accumulator.add_source(entry);
        }
        Self { anchor: Some(anchor.to_string()), picks: Vec::new(), accumulator }
    }

    /// Returns the grown state; `self` is consumed so no two evaluations share it.
    pub fn with_pick(mut self, entry: &SourceEntry) -> Self {
        self.accumulator.add_source(entry);
        self.picks.push(entry.name.clone());
        self
    }

    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Support picks, in pick order (anchor excluded).
    pub fn picks(&self) -> &[String] {
        &self.picks
    }

    /// Anchor first, then picks.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.anchor.as_deref().into_iter().chain(self.picks.iter().map(String::as_str))
    }

    pub fn contains(&self, source: &str) -> bool {
        self.anchor.as_deref() == Some(source) || self.picks.iter().any(|p| p == source)
    }

    /// Anchor included.
    pub fn len(&self) -> usize {
        self.picks.len() + usize::from(self.anchor.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn accumulator(&self) -> &TraitAccumulator {
        &self.accumulator
    }
}

/// 선택 제약 조건
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    /// Cap on the selection, anchor included.
    pub max_sources: usize,
    /// Owned non-character sources; considered before everything else.
    pub owned: FxHashSet<String>,
    /// Allowed anchors. Empty means unrestricted.
    pub target_anchors: FxHashSet<String>,
}

impl Constraints {
    pub fn new(max_sources: usize) -> Self {
        Self { max_sources, ..Self::default() }
    }

    pub fn with_owned<I, S>(mut self, owned: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.owned.extend(owned.into_iter().map(Into::into));
        self
    }

    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_anchors.extend(targets.into_iter().map(Into::into));
        self
    }

    pub fn is_owned(&self, source: &str) -> bool {
        self.owned.contains(source)
    }
}

/// Decides which sources the selector may pick and in what order it looks at them.
pub trait CandidatePolicy {
    fn order<'a>(
        &self,
        index: &'a ReverseIndex,
        state: &SelectionState,
        constraints: &Constraints,
    ) -> Vec<&'a SourceEntry>;
}

/// Non-character sources: owned first, then the rest; each group by gold count, descending.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnedFirstByGold;

impl CandidatePolicy for OwnedFirstByGold {
    fn order<'a>(
        &self,
        index: &'a ReverseIndex,
        state: &SelectionState,
        constraints: &Constraints,
    ) -> Vec<&'a SourceEntry> {
        let (mut owned, mut other): (Vec<&SourceEntry>, Vec<&SourceEntry>) = index
            .iter()
            .filter(|entry| !entry.category.is_character() && !state.contains(&entry.name))
            .partition(|entry| constraints.is_owned(&entry.name));

        // stable: index order survives on equal gold counts
        owned.sort_by_key(|entry| std::cmp::Reverse(entry.gold_count()));
        other.sort_by_key(|entry| std::cmp::Reverse(entry.gold_count()));

        owned.extend(other);
        owned
    }
}

/// 그리디 선택기
#[derive(Debug, Clone)]
pub struct GreedySelector<P = OwnedFirstByGold> {
    pub gain_per_trait: u32,
    pub policy: P,
}

impl Default for GreedySelector {
    fn default() -> Self {
        Self { gain_per_trait: 5, policy: OwnedFirstByGold }
    }
}

impl GreedySelector {
    pub fn new(gain_per_trait: u32) -> Self {
        Self { gain_per_trait, policy: OwnedFirstByGold }
    }
}

impl<P: CandidatePolicy> GreedySelector<P> {
    pub fn with_policy(gain_per_trait: u32, policy: P) -> Self {
        Self { gain_per_trait, policy }
    }

    /// Local gain estimate for one candidate.
    pub fn gain(&self, entry: &SourceEntry) -> u64 {
        u64::from(self.gain_per_trait) * entry.distinct_trait_count() as u64
    }

    /// Grow `state` until `max_sources` is reached or candidates run out.
    pub fn run(
        &self,
        index: &ReverseIndex,
        mut state: SelectionState,
        constraints: &Constraints,
    ) -> SelectionState {
        let candidates = self.policy.order(index, &state, constraints);
        let mut taken = vec![false; candidates.len()];

        while state.len() < constraints.max_sources {
            let mut best: Option<(usize, u64)> = None;
            for (slot, entry) in candidates.iter().enumerate() {
                if taken[slot] {
                    continue;
                }
                let gain = self.gain(entry);
                // strict: earlier candidates win ties
                if best.map_or(true, |(_, best_gain)| gain > best_gain) {
                    best = Some((slot, gain));
                }
            }

            let Some((slot, gain)) = best else {
                break;
            };
            taken[slot] = true;
            log::trace!("greedy pick '{}' (gain {})", candidates[slot].name, gain);
            state = state.with_pick(candidates[slot]);
        }

        state
    }
}
