//! Merge histories and what can be read back out of them.
//!
//! A clustering run produces a [`MergeHistory`]: the ordered list of merges,
//! equivalent to a dendrogram stored flat. Nothing here recomputes distances;
//! everything is derived by replaying records.
//!
//! ```text
//! step │ merge   │ distance │ groups after
//! ─────┼─────────┼──────────┼─────────────
//!   0  │ (0, 1)  │   1.0    │ {0,1} {2} {3}
//!   1  │ (2, 3)  │   1.0    │ {0,1} {2,3}
//!   2  │ (0, 2)  │   8.0    │ {0,1,2,3}
//! ```
//!
//! - [`resolve`] / [`AssignmentResolver`]: cut to exactly `k` groups.
//! - [`MergeHistory::cut_at_distance`]: cut at a height.
//! - [`cophenetic`]: the ultrametric induced by the history.

mod history;
mod resolve;
mod ultrametric;
mod union_find;

pub use history::{MergeHistory, MergeRecord};
pub use resolve::{resolve, AssignmentResolver};
pub use ultrametric::{cophenetic, Cophenetic};
