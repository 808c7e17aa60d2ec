//! Category catalog and reverse index (source → granted inheritances).
//!
//! The sheet is organised per inheritance; the planner needs the opposite
//! view. [`ReverseIndex::build`] walks every normalized record once and files
//! each (inheritance, source) edge under its source, classifying a source the
//! first time it is seen.

use super::types::{Category, TraitOccurrence, TraitRecord};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered membership lists used to classify sources.
///
/// Resource categories are checked in insertion order, the character list
/// after all of them.
#[derive(Debug, Clone, Default)]
pub struct CategoryCatalog {
    resources: Vec<(Category, FxHashSet<String>)>,
    characters: FxHashSet<String>,
}

impl CategoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add members to a category. Repeated calls for the same category merge.
    pub fn with_members<I, S>(mut self, category: Category, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members = members.into_iter().map(Into::into);
        match category {
            Category::Char => self.characters.extend(members),
            Category::Unknown => {}
            _ => match self.resources.iter_mut().find(|(c, _)| *c == category) {
                Some((_, set)) => set.extend(members),
                None => self.resources.push((category, members.collect())),
            },
        }
        self
    }

    /// 설정 파일의 카테고리 맵에서 생성 (BTreeMap 순서 = ATK, DEF, VIT, MST, TRM, CHAR)
    pub fn from_map(map: &BTreeMap<Category, Vec<String>>) -> Self {
        map.iter()
            .fold(Self::new(), |catalog, (category, members)| {
                catalog.with_members(*category, members.iter().cloned())
            })
    }

    /// First match wins; `Unknown` when no list contains the source.
    pub fn classify(&self, source: &str) -> Category {
        self.resources
            .iter()
            .find(|(_, members)| members.contains(source))
            .map(|(category, _)| *category)
            .or_else(|| self.characters.contains(source).then_some(Category::Char))
            .unwrap_or(Category::Unknown)
    }

    pub fn is_character(&self, source: &str) -> bool {
        self.characters.contains(source)
    }

    /// 캐릭터 카탈로그 (정렬됨 - 무작위 앵커 추첨의 결정성 보장)
    pub fn characters_sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.characters.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// One source and everything it grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub name: String,
    pub category: Category,
    pub traits: Vec<TraitOccurrence>,
}

impl SourceEntry {
    /// 골드 계승 수 (후보 정렬 기준)
    pub fn gold_count(&self) -> usize {
        self.traits.iter().filter(|t| t.is_gold()).count()
    }

    /// Distinct inheritance names granted by this source.
    pub fn distinct_trait_count(&self) -> usize {
        self.traits
            .iter()
            .map(|t| t.name.as_str())
            .collect::<FxHashSet<_>>()
            .len()
    }
}

/// Source name → granted inheritances, in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct ReverseIndex {
    entries: Vec<SourceEntry>,
    lookup: FxHashMap<String, usize>,
}

impl ReverseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from rows that already exclude level 3.
    pub fn build(records: &[TraitRecord], catalog: &CategoryCatalog) -> Self {
        let mut index = Self::new();
        for record in records {
            index.insert_record(record, catalog);
        }
        log::debug!(
            "Reverse index built: {} sources from {} records",
            index.len(),
            records.len()
        );
        index
    }

    /// File one record under each of its sources.
    pub fn insert_record(&mut self, record: &TraitRecord, catalog: &CategoryCatalog) {
        for source in &record.sources {
            let slot = match self.lookup.get(source) {
                Some(&slot) => slot,
                None => {
                    let slot = self.entries.len();
                    self.entries.push(SourceEntry {
                        name: source.clone(),
                        category: catalog.classify(source),
                        traits: Vec::new(),
                    });
                    self.lookup.insert(source.clone(), slot);
                    slot
                }
            };
            self.entries[slot].traits.push(TraitOccurrence::new(
                record.trait_name.clone(),
                record.level,
                record.rarity,
            ));
        }
    }

    pub fn get(&self, source: &str) -> Option<&SourceEntry> {
        self.lookup.get(source).map(|&slot| &self.entries[slot])
    }

    /// Category of a source; sources absent from the index fall back to the catalog.
    pub fn category_of(&self, source: &str, catalog: &CategoryCatalog) -> Category {
        self.get(source)
            .map(|entry| entry.category)
            .unwrap_or_else(|| catalog.classify(source))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::Rarity;
    use super::*;

    fn catalog() -> CategoryCatalog {
        CategoryCatalog::new()
            .with_members(Category::Atk, ["Sword", "Twin Blade"])
            .with_members(Category::Def, ["Shield"])
            .with_members(Category::Char, ["Hero", "Twin Blade"])
    }

    #[test]
    fn test_classify_resource_before_character() {
        let catalog = catalog();
        assert_eq!(catalog.classify("Sword"), Category::Atk);
        assert_eq!(catalog.classify("Shield"), Category::Def);
        assert_eq!(catalog.classify("Hero"), Category::Char);
        // 자원 카탈로그가 캐릭터보다 먼저 검사됨
        assert_eq!(catalog.classify("Twin Blade"), Category::Atk);
        assert_eq!(catalog.classify("Mystery Box"), Category::Unknown);
    }

    #[test]
    fn test_build_groups_by_source_in_insertion_order() {
        let records = vec![
            TraitRecord::new("Power", 1, &["Sword", "Shield"], Rarity::Gold),
            TraitRecord::new("Guard", 0, &["Shield", "Mystery Box"], Rarity::White),
            TraitRecord::new("Nothing", 2, &[], Rarity::White),
        ];
        let index = ReverseIndex::build(&records, &catalog());

        let names: Vec<&str> = index.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Sword", "Shield", "Mystery Box"]);

        let shield = index.get("Shield").unwrap();
        assert_eq!(shield.category, Category::Def);
        assert_eq!(shield.traits.len(), 2);
        assert_eq!(shield.traits[0], TraitOccurrence::new("Power", 1, Rarity::Gold));
        assert_eq!(shield.gold_count(), 1);

        assert_eq!(index.get("Mystery Box").unwrap().category, Category::Unknown);
    }

    #[test]
    fn test_category_fixed_on_first_insertion() {
        let mut index = ReverseIndex::new();
        let first = CategoryCatalog::new().with_members(Category::Vit, ["Amulet"]);
        let second = CategoryCatalog::new().with_members(Category::Mst, ["Amulet"]);

        index.insert_record(&TraitRecord::new("A", 0, &["Amulet"], Rarity::White), &first);
        index.insert_record(&TraitRecord::new("B", 0, &["Amulet"], Rarity::White), &second);

        assert_eq!(index.get("Amulet").unwrap().category, Category::Vit);
        assert_eq!(index.get("Amulet").unwrap().traits.len(), 2);
    }

    #[test]
    fn test_distinct_trait_count_dedups_levels() {
        let records = vec![
            TraitRecord::new("Power", 0, &["Sword"], Rarity::Gold),
            TraitRecord::new("Power", 1, &["Sword"], Rarity::Gold),
            TraitRecord::new("Edge", 2, &["Sword"], Rarity::White),
        ];
        let index = ReverseIndex::build(&records, &catalog());
        let sword = index.get("Sword").unwrap();
        assert_eq!(sword.traits.len(), 3);
        assert_eq!(sword.distinct_trait_count(), 2);
    }

    #[test]
    fn test_from_map_orders_resources() {
        let mut map = BTreeMap::new();
        map.insert(Category::Char, vec!["Hero".to_string()]);
        map.insert(Category::Trm, vec!["Tome".to_string()]);
        let catalog = CategoryCatalog::from_map(&map);
        assert_eq!(catalog.classify("Tome"), Category::Trm);
        assert!(catalog.is_character("Hero"));
        assert_eq!(catalog.characters_sorted(), vec!["Hero"]);
    }
}
