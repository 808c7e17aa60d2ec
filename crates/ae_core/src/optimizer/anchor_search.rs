//! Anchor search: one greedy run per candidate anchor, best valid result wins.
//!
//! Anchor resolution:
//! - non-empty target restriction: every owned target that classifies as
//!   CHAR; index order first, then characters without sheet rows by name
//! - otherwise the explicit anchor, if configured
//! - otherwise one owned source classifying as CHAR, drawn uniformly at random
//!
//! Each anchor's selection is grown from `{anchor}`, checked for category
//! diversity and scored. Invalid selections are dropped. The strictly highest
//! total wins; the first anchor evaluated wins ties.

use super::catalog::{CategoryCatalog, ReverseIndex};
use super::diversity::is_diverse;
use super::scoring::{score, ScoreDetail, ScoringWeights};
use super::selection::{CandidatePolicy, Constraints, GreedySelector, SelectionState};
use crate::config::PlannerConfig;
use crate::error::{PlannerError, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// 최적화 결과
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub anchor: Option<String>,
    /// Support picks in pick order; the anchor is not repeated here.
    pub sources: Vec<String>,
    pub unique_trait_count: usize,
    pub total_score: u64,
    pub details: Vec<ScoreDetail>,
    /// Duplicated inheritances, highest score first.
    pub targets: Vec<ScoreDetail>,
}

impl OptimizationResult {
    /// The canonical "nothing found" result.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.anchor.is_none() && self.sources.is_empty()
    }

    pub fn from_state(state: &SelectionState, weights: &ScoringWeights) -> Self {
        let sheet = score(state.accumulator(), weights);
        Self {
            anchor: state.anchor().map(str::to_string),
            sources: state.picks().to_vec(),
            unique_trait_count: state.accumulator().len(),
            total_score: sheet.total_score,
            details: sheet.details,
            targets: sheet.targets,
        }
    }
}

/// How the search resolved its anchors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorPlan {
    /// Every eligible anchor, evaluated in order.
    Restricted(Vec<String>),
    /// A single configured anchor.
    Explicit(String),
    /// A single anchor drawn from the owned character pool.
    Sampled(String),
    /// Nothing satisfies ownership/catalog/target constraints.
    NoEligible,
}

impl AnchorPlan {
    pub fn anchors(&self) -> Vec<String> {
        match self {
            AnchorPlan::Restricted(anchors) => anchors.clone(),
            AnchorPlan::Explicit(anchor) | AnchorPlan::Sampled(anchor) => vec![anchor.clone()],
            AnchorPlan::NoEligible => Vec::new(),
        }
    }
}

/// 앵커 탐색기
#[derive(Debug, Clone)]
pub struct AnchorSearch<P = super::selection::OwnedFirstByGold> {
    pub constraints: Constraints,
    pub owned_characters: FxHashSet<String>,
    pub explicit_anchor: Option<String>,
    pub weights: ScoringWeights,
    pub selector: GreedySelector<P>,
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl AnchorSearch {
    pub fn new(constraints: Constraints) -> Self {
        Self {
            constraints,
            owned_characters: FxHashSet::default(),
            explicit_anchor: None,
            weights: ScoringWeights::default(),
            selector: GreedySelector::default(),
            seed: None,
            parallel: false,
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        let constraints = Constraints::new(config.max_sources)
            .with_owned(config.owned_sources.iter().cloned())
            .with_targets(config.target_anchors.iter().cloned());
        Self {
            constraints,
            owned_characters: config.owned_characters.iter().cloned().collect(),
            explicit_anchor: config.anchor.clone(),
            weights: config.weights,
            selector: GreedySelector::new(config.gain_per_trait),
            seed: config.seed,
            parallel: config.parallel,
        }
    }

    pub fn with_owned_characters<I, S>(mut self, owned: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.owned_characters.extend(owned.into_iter().map(Into::into));
        self
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.explicit_anchor = Some(anchor.into());
        self
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl<P: CandidatePolicy + Sync> AnchorSearch<P> {
    /// Run with the configured seed, or OS entropy when none is set.
    pub fn run(&self, index: &ReverseIndex, catalog: &CategoryCatalog) -> Result<OptimizationResult> {
        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        self.run_with_rng(index, catalog, &mut rng)
    }

    /// Run with an injected randomness source (only used for the sampled-anchor draw).
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        index: &ReverseIndex,
        catalog: &CategoryCatalog,
        rng: &mut R,
    ) -> Result<OptimizationResult> {
        if self.constraints.max_sources == 0 {
            return Err(PlannerError::InvalidConfig(
                "max_sources must be at least 1".to_string(),
            ));
        }

        let plan = self.plan_anchors(index, catalog, rng);
        let anchors = plan.anchors();
        if anchors.is_empty() {
            log::warn!("No eligible anchor: check owned characters and target anchors");
            return Ok(OptimizationResult::empty());
        }
        log::info!("Evaluating {} anchor(s) ({:?})", anchors.len(), plan);

        let outcomes: Vec<Option<OptimizationResult>> = if self.parallel {
            anchors.par_iter().map(|a| self.evaluate_anchor(a, index, catalog)).collect()
        } else {
            anchors.iter().map(|a| self.evaluate_anchor(a, index, catalog)).collect()
        };

        let mut best: Option<OptimizationResult> = None;
        for candidate in outcomes.into_iter().flatten() {
            if best.as_ref().map_or(true, |current| candidate.total_score > current.total_score) {
                best = Some(candidate);
            }
        }

        match best {
            Some(result) => {
                log::info!(
                    "Best anchor '{}' with score {}",
                    result.anchor.as_deref().unwrap_or("-"),
                    result.total_score
                );
                Ok(result)
            }
            None => {
                log::warn!("No anchor produced a selection satisfying the diversity rule");
                Ok(OptimizationResult::empty())
            }
        }
    }

    /// Resolve which anchors to evaluate.
    pub fn plan_anchors<R: Rng + ?Sized>(
        &self,
        index: &ReverseIndex,
        catalog: &CategoryCatalog,
        rng: &mut R,
    ) -> AnchorPlan {
        if !self.constraints.target_anchors.is_empty() {
            let eligible = |name: &str| {
                self.constraints.target_anchors.contains(name)
                    && self.is_anchor_candidate(name, catalog)
            };
            let mut anchors: Vec<String> = index
                .iter()
                .filter(|entry| eligible(entry.name.as_str()))
                .map(|entry| entry.name.clone())
                .collect();
            // 시트에 등장하지 않는 캐릭터 (계승 0개)
            anchors.extend(
                catalog
                    .characters_sorted()
                    .into_iter()
                    .filter(|name| index.get(name).is_none() && eligible(*name))
                    .map(str::to_string),
            );
            return if anchors.is_empty() {
                AnchorPlan::NoEligible
            } else {
                AnchorPlan::Restricted(anchors)
            };
        }

        if let Some(anchor) = &self.explicit_anchor {
            return AnchorPlan::Explicit(anchor.clone());
        }

        let pool: Vec<&str> = catalog
            .characters_sorted()
            .into_iter()
            .filter(|name| self.is_anchor_candidate(*name, catalog))
            .collect();
        if pool.is_empty() {
            return AnchorPlan::NoEligible;
        }
        let idx = rng.gen_range(0..pool.len());
        AnchorPlan::Sampled(pool[idx].to_string())
    }

    /// Owned, and classified as CHAR (a name also listed under a resource category is not).
    fn is_anchor_candidate(&self, name: &str, catalog: &CategoryCatalog) -> bool {
        self.owned_characters.contains(name) && catalog.classify(name).is_character()
    }

    /// Grow, validate and score one anchor. `None` when the selection is not diverse.
    pub fn evaluate_anchor(
        &self,
        anchor: &str,
        index: &ReverseIndex,
        catalog: &CategoryCatalog,
    ) -> Option<OptimizationResult> {
        let state = self.selector.run(
            index,
            SelectionState::with_anchor(anchor, index),
            &self.constraints,
        );

        if !is_diverse(&state, index, catalog) {
            log::debug!("Anchor '{}' discarded: selection not diverse", anchor);
            return None;
        }

        let result = OptimizationResult::from_state(&state, &self.weights);
        log::debug!("Anchor '{}' scored {}", anchor, result.total_score);
        Some(result)
    }
}
