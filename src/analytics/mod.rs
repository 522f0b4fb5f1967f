// src/analytics/mod.rs

//! Test-history aggregation: subject and topic normalization, the
//! single-pass aggregator, and the fuzzy topic drill-down.

pub mod aggregator;
pub mod drill_down;
pub mod evaluate;
pub mod matcher;
pub mod subject;
pub mod topic;

pub use aggregator::aggregate;
pub use drill_down::topic_detail;
pub use matcher::match_topic;
pub use subject::normalize_subject;
