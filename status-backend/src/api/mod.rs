// status-backend/src/api/mod.rs
//
// HTTPルーティング層は別クレートが担う。ここには境界を跨ぐDTOだけを置く。
pub mod dto;
