//! Demand book: the ranked ordering of demand for one supply.
//!
//! ## Components
//!
//! - [`DemandNode`]: a demand with its rank and a same-rank forward link
//! - [`RankLevel`]: FIFO queue of demands sharing one rank
//! - [`DemandBook`]: slab storage plus rank levels, highest first
//!
//! ## Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Insert | O(log r) |
//! | Duplicate id check | O(1) |
//! | Full ranked walk | O(n) |
//!
//! where r is the number of distinct ranks.

pub mod node;
pub mod level;
#[allow(clippy::module_inception)]
pub mod book;

pub use node::DemandNode;
pub use level::RankLevel;
pub use book::{DemandBook, RankedIter};
