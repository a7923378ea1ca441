//! The four independent checks. Each borrows both collections, issues only
//! reads, and returns a [`CheckResult`](crate::CheckResult) or a fatal error.

pub mod content;
pub mod count;
pub mod ids;
pub mod indexes;

pub use content::compare_sample_content;
pub use count::check_counts;
pub use ids::compare_ids;
pub use indexes::compare_indexes;
