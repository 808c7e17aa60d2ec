// 계승 최적화: 카탈로그 → 앵커 탐색 → 그리디 선택 → 다양성 검사 → 점수

pub mod anchor_search;
pub mod catalog;
pub mod diversity;
pub mod scoring;
pub mod selection;
pub mod types;

pub use anchor_search::*;
pub use catalog::*;
pub use diversity::*;
pub use scoring::*;
pub use selection::*;
pub use types::*;
