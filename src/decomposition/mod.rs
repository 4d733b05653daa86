//! Matrix decompositions: LU, LU with partial pivoting, and the closed-form
//! 2x2 SVD kernel.
//!
//! Decompositions are computed eagerly at construction and are immutable
//! afterwards; `solvable()` is a pure predicate over the stored factors and
//! `solve()` refuses (with [`Error::SingularMatrix`](crate::Error)) rather
//! than returning garbage.

mod config;
mod lu;
mod svd2;

pub use config::PivotConfig;
pub use lu::{LuDecomposition, LupDecomposition};
pub use svd2::{svd2, Svd2};
