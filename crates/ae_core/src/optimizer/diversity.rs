// 카테고리 다양성 검사
use super::catalog::{CategoryCatalog, ReverseIndex};
use super::selection::SelectionState;
use super::types::Category;
use std::collections::BTreeMap;

/// 카테고리당 최소 소스 수
pub const MIN_SOURCES_PER_CATEGORY: usize = 2;
/// 조건을 만족해야 하는 카테고리 수
pub const MIN_QUALIFYING_CATEGORIES: usize = 2;

/// Category → member count over the whole selection, anchor included.
pub fn category_tally(
    state: &SelectionState,
    index: &ReverseIndex,
    catalog: &CategoryCatalog,
) -> BTreeMap<Category, usize> {
    let mut tally = BTreeMap::new();
    for source in state.members() {
        *tally.entry(index.category_of(source, catalog)).or_insert(0) += 1;
    }
    tally
}

/// At least two categories with two or more sources each.
pub fn is_diverse(
    state: &SelectionState,
    index: &ReverseIndex,
    catalog: &CategoryCatalog,
) -> bool {
    category_tally(state, index, catalog)
        .values()
        .filter(|&&count| count >= MIN_SOURCES_PER_CATEGORY)
        .count()
        >= MIN_QUALIFYING_CATEGORIES
}

#[cfg(test)]
mod tests {
    use super::super::types::{Rarity, TraitRecord};
    use super::*;

    fn setup() -> (ReverseIndex, CategoryCatalog) {
        let catalog = CategoryCatalog::new()
            .with_members(Category::Atk, ["Sword", "Axe"])
            .with_members(Category::Def, ["Shield", "Helm"])
            .with_members(Category::Char, ["Hero"]);
        let records = vec![TraitRecord::new(
            "Power",
            0,
            &["Sword", "Axe", "Shield", "Helm", "Relic", "Hero"],
            Rarity::White,
        )];
        (ReverseIndex::build(&records, &catalog), catalog)
    }

    fn state(index: &ReverseIndex, anchor: &str, picks: &[&str]) -> SelectionState {
        picks.iter().fold(SelectionState::with_anchor(anchor, index), |s, p| {
            s.with_pick(index.get(p).unwrap())
        })
    }

    #[test]
    fn test_two_pairs_is_diverse() {
        let (index, catalog) = setup();
        let s = state(&index, "Hero", &["Sword", "Axe", "Shield", "Helm"]);
        assert!(is_diverse(&s, &index, &catalog));
    }

    #[test]
    fn test_single_pair_is_not_diverse() {
        let (index, catalog) = setup();
        let s = state(&index, "Hero", &["Sword", "Axe", "Shield"]);
        let tally = category_tally(&s, &index, &catalog);
        assert_eq!(tally[&Category::Atk], 2);
        assert_eq!(tally[&Category::Def], 1);
        assert_eq!(tally[&Category::Char], 1);
        assert!(!is_diverse(&s, &index, &catalog));
    }

    #[test]
    fn test_unknown_counts_as_a_category() {
        let (index, catalog) = setup();
        let mut s = state(&index, "Hero", &["Sword", "Axe", "Relic"]);
        assert!(!is_diverse(&s, &index, &catalog));
        // a second unknown source forms its own qualifying pair
        let extra = super::super::catalog::SourceEntry {
            name: "Trinket".to_string(),
            category: Category::Unknown,
            traits: Vec::new(),
        };
        s = s.with_pick(&extra);
        assert!(is_diverse(&s, &index, &catalog));
    }

    #[test]
    fn test_anchor_missing_from_index_uses_catalog() {
        let (index, catalog) = setup();
        let catalog = catalog.with_members(Category::Char, ["Sage"]);
        let s = state(&index, "Sage", &["Hero"]);
        assert_eq!(category_tally(&s, &index, &catalog)[&Category::Char], 2);
    }
}
