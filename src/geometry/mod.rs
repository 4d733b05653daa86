//! Geometric primitives built on the vector/matrix façade.

mod hyperplane;
mod line;
mod quaternion;

pub use hyperplane::Hyperplane;
pub use line::{intersect_line_hyperplane, Line, LineSegment};
pub use quaternion::Quaternion;
