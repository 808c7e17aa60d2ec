//! # Planner Configuration
//!
//! 최적화에 쓰이는 모든 튜닝 값과 보유 목록을 한 곳에서 관리.
//!
//! ```rust
//! use ae_core::config::PlannerConfig;
//!
//! let config = PlannerConfig::default();
//! assert_eq!(config.max_sources, 6);
//! ```

use crate::error::{PlannerError, Result};
use crate::optimizer::{Category, CategoryCatalog, ScoringWeights};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// 플래너 설정 (YAML)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// 최대 소스 수, 앵커 포함 (기본: 6)
    pub max_sources: usize,
    /// 중복 계승 가중치 (기본: gold 100 / white 10)
    pub weights: ScoringWeights,
    /// 그리디 이득 = gain_per_trait × 고유 계승 수 (기본: 5)
    pub gain_per_trait: u32,
    /// 고정 앵커 (target_anchors가 비어 있을 때만 사용)
    pub anchor: Option<String>,
    /// 허용 앵커 목록, 비어 있으면 제한 없음
    pub target_anchors: Vec<String>,
    /// 보유 캐릭터
    pub owned_characters: Vec<String>,
    /// 보유 비캐릭터 소스
    pub owned_sources: Vec<String>,
    /// 무작위 앵커 추첨 시드
    pub seed: Option<u64>,
    /// 앵커별 평가 병렬 실행
    pub parallel: bool,
    /// 카테고리 → 소스 목록
    pub catalog: BTreeMap<Category, Vec<String>>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_sources: 6,
            weights: ScoringWeights::default(),
            gain_per_trait: 5,
            anchor: None,
            target_anchors: Vec::new(),
            owned_characters: Vec::new(),
            owned_sources: Vec::new(),
            seed: None,
            parallel: false,
            catalog: BTreeMap::new(),
        }
    }
}

impl PlannerConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&yaml)?;
        log::debug!("Loaded planner config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_sources == 0 {
            return Err(PlannerError::InvalidConfig(
                "max_sources must be at least 1".to_string(),
            ));
        }
        if self.catalog.contains_key(&Category::Unknown) {
            return Err(PlannerError::InvalidConfig(
                "catalog cannot list members for 'unknown'".to_string(),
            ));
        }
        Ok(())
    }

    pub fn category_catalog(&self) -> CategoryCatalog {
        CategoryCatalog::from_map(&self.catalog)
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
max_sources: 7
weights:
  gold: 50
target_anchors: [Hero]
owned_characters: [Hero, Rogue]
owned_sources: [Sword]
seed: 9
catalog:
  ATK: [Sword]
  DEF: [Shield]
  CHAR: [Hero, Rogue]
"#;

    #[test]
    fn test_default_config() {
        let cfg = PlannerConfig::default();
        assert_eq!(cfg.max_sources, 6);
        assert_eq!(cfg.weights, ScoringWeights { gold: 100, white: 10 });
        assert_eq!(cfg.gain_per_trait, 5);
        assert!(cfg.anchor.is_none());
        assert!(!cfg.parallel);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let cfg = PlannerConfig::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(cfg.max_sources, 7);
        assert_eq!(cfg.weights.gold, 50);
        assert_eq!(cfg.weights.white, 10);
        assert_eq!(cfg.gain_per_trait, 5);
        assert_eq!(cfg.seed, Some(9));

        let catalog = cfg.category_catalog();
        assert_eq!(catalog.classify("Sword"), Category::Atk);
        assert_eq!(catalog.classify("Rogue"), Category::Char);
    }

    #[test]
    fn test_zero_max_sources_rejected() {
        let err = PlannerConfig::from_yaml_str("max_sources: 0").unwrap_err();
        assert!(matches!(err, PlannerError::InvalidConfig(_)));
    }

    #[test]
    fn test_unknown_category_key_rejected() {
        let err = PlannerConfig::from_yaml_str("catalog:\n  unknown: [Thing]").unwrap_err();
        assert!(matches!(err, PlannerError::InvalidConfig(_)));
        let err = PlannerConfig::from_yaml_str("catalog:\n  SPD: [Thing]").unwrap_err();
        assert!(matches!(err, PlannerError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let cfg = PlannerConfig::load(file.path()).unwrap();
        assert_eq!(cfg.owned_sources, vec!["Sword".to_string()]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = PlannerConfig::load(Path::new("/nonexistent/planner.yaml")).unwrap_err();
        assert!(matches!(err, PlannerError::Io(_)));
    }
}
