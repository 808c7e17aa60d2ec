// 계승(Inheritance) 데이터 구조
use serde::{Deserialize, Serialize};
use std::fmt;

/// 계승 레어도 (시트 배경색 기준)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    /// 흰색이 아닌 배경 (고가치)
    Gold,
    /// 기본
    #[default]
    White,
}

impl Rarity {
    /// Anything other than `gold` (trimmed, case-insensitive) is white.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("gold") {
            Rarity::Gold
        } else {
            Rarity::White
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Gold => "gold",
            Rarity::White => "white",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// 소스 분류 (자원 5종 + 캐릭터)
///
/// Declaration order is the order a config-built catalog checks resources in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Category {
    #[serde(rename = "ATK")]
    Atk,
    #[serde(rename = "DEF")]
    Def,
    #[serde(rename = "VIT")]
    Vit,
    #[serde(rename = "MST")]
    Mst,
    #[serde(rename = "TRM")]
    Trm,
    #[serde(rename = "CHAR")]
    Char,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl Category {
    pub const RESOURCES: [Category; 5] =
        [Category::Atk, Category::Def, Category::Vit, Category::Mst, Category::Trm];

    /// 리포트용 라벨
    pub fn label(&self) -> &'static str {
        match self {
            Category::Atk => "ATK",
            Category::Def => "DEF",
            Category::Vit => "VIT",
            Category::Mst => "MST",
            Category::Trm => "TRM",
            Category::Char => "CHAR",
            Category::Unknown => "unknown",
        }
    }

    pub fn is_character(&self) -> bool {
        matches!(self, Category::Char)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.label())
    }
}

/// 하나의 (계승, 소스) 간선
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitOccurrence {
    pub name: String,
    /// 0-2 (레벨 3은 상위 단계에서 제외)
    pub level: u8,
    pub rarity: Rarity,
}

impl TraitOccurrence {
    pub fn new(name: impl Into<String>, level: u8, rarity: Rarity) -> Self {
        Self { name: name.into(), level, rarity }
    }

    pub fn is_gold(&self) -> bool {
        self.rarity == Rarity::Gold
    }
}

/// Normalized sheet row: one inheritance at one level, with every source that grants it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitRecord {
    pub trait_name: String,
    pub level: u8,
    pub sources: Vec<String>,
    pub rarity: Rarity,
}

impl TraitRecord {
    pub fn new(
        trait_name: impl Into<String>,
        level: u8,
        sources: &[&str],
        rarity: Rarity,
    ) -> Self {
        Self {
            trait_name: trait_name.into(),
            level,
            sources: sources.iter().map(|s| s.to_string()).collect(),
            rarity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_parse() {
        assert_eq!(Rarity::parse("gold"), Rarity::Gold);
        assert_eq!(Rarity::parse(" GOLD "), Rarity::Gold);
        assert_eq!(Rarity::parse("white"), Rarity::White);
        assert_eq!(Rarity::parse(""), Rarity::White);
    }

    #[test]
    fn test_category_serde_labels() {
        let json = serde_json::to_string(&Category::Char).unwrap();
        assert_eq!(json, "\"CHAR\"");
        let parsed: Category = serde_json::from_str("\"TRM\"").unwrap();
        assert_eq!(parsed, Category::Trm);
        assert_eq!(Category::Unknown.label(), "unknown");
    }
}
