//! # ae_core - Inheritance Planner
//!
//! Picks a bounded set of sources (characters and traces) around a pinned
//! anchor character so that as many inheritances as possible are granted by
//! two or more of them.
//!
//! ## Pipeline
//! - `ingest`: exported sheet rows → normalized records
//! - `optimizer::catalog`: records → reverse index (source → inheritances)
//! - `optimizer::anchor_search`: per anchor, greedy selection →
//!   diversity check → scoring; best valid result wins
//!
//! The search is a heuristic. It does not guarantee the optimal subset.

pub mod config;
pub mod error;
pub mod ingest;
pub mod optimizer;

pub use config::PlannerConfig;
pub use error::{PlannerError, Result};
pub use optimizer::{
    AnchorSearch, Category, CategoryCatalog, OptimizationResult, Rarity, ReverseIndex,
    ScoreDetail, ScoringWeights, TraitRecord,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

/// [`plan`]의 결과: 최적 조합 + 리포트용 카탈로그/인덱스
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub catalog: CategoryCatalog,
    pub index: ReverseIndex,
    pub result: OptimizationResult,
}

impl PlanOutcome {
    /// Category of any source, including anchors absent from the index.
    pub fn category_of(&self, source: &str) -> Category {
        self.index.category_of(source, &self.catalog)
    }
}

/// Build the reverse index from `records` and run the anchor search described by `config`.
pub fn plan(records: &[TraitRecord], config: &PlannerConfig) -> Result<PlanOutcome> {
    config.validate()?;
    let catalog = config.category_catalog();
    let index = ReverseIndex::build(records, &catalog);
    let result = AnchorSearch::from_config(config).run(&index, &catalog)?;
    Ok(PlanOutcome { catalog, index, result })
}
