#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Geometric primitives that turn task polygons into terrain.
//!
//! Polygons are rasterized into half-open horizontal [`Row`] spans, which
//! also back [`point_in_poly`] and the wall/free fills performed by
//! [`paint_rows`]. [`trace_poly`] is the inverse for simply connected cell
//! sets, and [`visible`] decides which manipulator cells a bot can reach.

mod error;
mod raster;
mod trace;
mod visibility;

pub use error::GeometryError;
pub use raster::{paint_rows, point_in_poly, poly_bb, rasterize_poly, Rect, Row};
pub use trace::trace_poly;
pub use visibility::visible;
