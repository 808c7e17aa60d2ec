// 중복 계승 점수 계산
use super::catalog::SourceEntry;
use super::types::Rarity;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// 중복 계승 가중치
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// 골드 계승 2회 이상 (기본: 100)
    pub gold: u32,
    /// 화이트 계승 2회 이상 (기본: 10)
    pub white: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self { gold: 100, white: 10 }
    }
}

impl ScoringWeights {
    pub fn for_rarity(&self, rarity: Rarity) -> u32 {
        match rarity {
            Rarity::Gold => self.gold,
            Rarity::White => self.white,
        }
    }
}

/// Accumulated state of one inheritance across a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitTally {
    pub name: String,
    /// Highest level seen on any selected source.
    pub level: u8,
    /// Number of selected sources granting it.
    pub count: u32,
    /// Rarity of the first occurrence seen.
    pub rarity: Rarity,
}

/// Inheritance name → tally, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraitAccumulator {
    tallies: Vec<TraitTally>,
    lookup: FxHashMap<String, usize>,
}

impl TraitAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a source's inheritances once each, at the source's best level.
    pub fn add_source(&mut self, entry: &SourceEntry) {
        let mut per_source: Vec<(&str, u8, Rarity)> = Vec::new();
        for occurrence in &entry.traits {
            match per_source.iter_mut().find(|(name, _, _)| *name == occurrence.name) {
                Some((_, level, _)) => *level = (*level).max(occurrence.level),
                None => per_source.push((occurrence.name.as_str(), occurrence.level, occurrence.rarity)),
            }
        }

        for (name, level, rarity) in per_source {
            match self.lookup.get(name) {
                Some(&slot) => {
                    let tally = &mut self.tallies[slot];
                    tally.count += 1;
                    tally.level = tally.level.max(level);
                }
                None => {
                    self.lookup.insert(name.to_string(), self.tallies.len());
                    self.tallies.push(TraitTally {
                        name: name.to_string(),
                        level,
                        count: 1,
                        rarity,
                    });
                }
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&TraitTally> {
        self.lookup.get(name).map(|&slot| &self.tallies[slot])
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraitTally> {
        self.tallies.iter()
    }

    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }
}

/// 리포트 한 줄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDetail {
    pub name: String,
    pub level: u8,
    pub count: u32,
    pub rarity: Rarity,
    pub score: u64,
}

/// Output of [`score`]. Totals widen to `u64`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreSheet {
    pub total_score: u64,
    pub details: Vec<ScoreDetail>,
    pub targets: Vec<ScoreDetail>,
}

/// Only duplicates score: a single copy is obtainable anyway.
pub fn trait_score(tally: &TraitTally, weights: &ScoringWeights) -> u64 {
    if tally.count >= 2 {
        u64::from(weights.for_rarity(tally.rarity))
    } else {
        0
    }
}

pub fn score(accumulator: &TraitAccumulator, weights: &ScoringWeights) -> ScoreSheet {
    let details: Vec<ScoreDetail> = accumulator
        .iter()
        .map(|tally| ScoreDetail {
            name: tally.name.clone(),
            level: tally.level,
            count: tally.count,
            rarity: tally.rarity,
            score: trait_score(tally, weights),
        })
        .collect();

    let total_score = details.iter().map(|d| d.score).sum();

    let mut targets: Vec<ScoreDetail> = details.iter().filter(|d| d.count >= 2).cloned().collect();
    // sort_by is stable: equal scores keep insertion order
    targets.sort_by(|a, b| b.score.cmp(&a.score));

    ScoreSheet { total_score, details, targets }
}
