#![feature(portable_simd)]

//! # Ganita: SIMD-backed fixed-dimension linear algebra
//!
//! A linear-algebra kernel for real-time geometry: vectors, matrices,
//! quaternions and geometric primitives over a uniform, width- and
//! type-generic SIMD backend, plus the numerical algorithms that need real
//! care — LU / pivoted-LU solves and the closed-form 2x2 SVD kernel.
//!
//! ## Quick start
//!
//! ```rust
//! use ganita::{Matrix, Vector};
//!
//! let a = Matrix::from_rows([[4.0f64, 3.0], [6.0, 3.0]]);
//! let b = Vector::new([1.0f64, 1.0]);
//!
//! let lup = a.decompose_lup();
//! assert!(lup.solvable());
//! let x = lup.solve(&b).unwrap();
//! assert!((x[0] - 0.0).abs() < 1e-12);
//! assert!((x[1] - 1.0 / 3.0).abs() < 1e-12);
//! ```
//!
//! ## Architecture
//!
//! The crate is organized into modules, leaf-first:
//!
//! - [`scalar`]: element-type capability traits ([`Scalar`], [`Real`])
//! - [`simd`]: the lane-block layer — one operation contract
//!   ([`LaneOps`]), a generic element-wise fallback ([`Lanes`]), explicit
//!   `std::simd` fast paths, and the compile-time dispatch table
//!   ([`LaneSelect`])
//! - [`vector`] / [`matrix`]: fixed-dimension façade types whose
//!   arithmetic is routed through the selected lane blocks
//! - [`decomposition`]: LU and pivoted LU with an explicit pivot tolerance
//!   policy, and the 2x2 SVD kernel
//! - [`geometry`]: quaternions, hyperplanes, lines and segments
//!
//! ## Data flow
//!
//! ```text
//!   Vector<T, N> / Matrix<T, R, C>
//!            │ arithmetic delegates to
//!            ▼
//!   <T as LaneSelect<N>>::Block      (chosen at compile time)
//!      ├─ Lanes<T, N>                 generic element-wise fallback
//!      └─ F32x4 / F32x8 / F64x2 / F64x4   std::simd fast paths
//!
//!   Matrix ──decompose──▶ LuDecomposition / LupDecomposition ──▶ solve
//!   Matrix2 ──svd2──▶ U · diag(σ) · Vᵀ
//! ```
//!
//! ## Dispatch guarantees
//!
//! Which block a `(scalar, width)` pair uses is decided entirely by the
//! type system; there is no runtime branch, and every block produces
//! results lane-for-lane identical to scalar arithmetic. Widths with no
//! native register mapping and scalars with no fast path take the generic
//! block through the same API, so algorithms never special-case.
//!
//! ## Error handling
//!
//! Numerical routines never return silently wrong answers: solving against
//! a (near-)singular decomposition yields [`Error::SingularMatrix`],
//! normalizing a near-zero vector yields [`Error::DegenerateGeometry`]
//! (or takes the caller's fallback via `normalized_or`), and runtime-sized
//! input of the wrong length yields [`Error::DimensionMismatch`] before
//! anything is partially written.
//!
//! Concurrency: every type is a plain owned value — `Send + Sync`, no
//! interior mutability, no locking. The only borrow-scoped type is the
//! move-only [`Submatrix`] view.

pub mod decomposition;
pub mod error;
pub mod geometry;
pub mod matrix;
pub mod scalar;
pub mod simd;
pub mod vector;

pub use decomposition::{svd2, LuDecomposition, LupDecomposition, PivotConfig, Svd2};
pub use error::{Error, Result};
pub use geometry::{intersect_line_hyperplane, Hyperplane, Line, LineSegment, Quaternion};
pub use matrix::{Matrix, Matrix2, Matrix3, Matrix4, Submatrix};
pub use scalar::{Real, Scalar};
pub use simd::{F32x4, F32x8, F64x2, F64x4, LaneOps, LaneSelect, Lanes};
pub use vector::{Vector, Vector2, Vector3, Vector4};
