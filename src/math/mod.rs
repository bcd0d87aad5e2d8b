pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type (millimeters).
pub type Point2 = nalgebra::Point2<f64>;

/// Global geometric tolerance for floating-point comparisons, in millimeters.
pub const TOLERANCE: f64 = 1e-6;

/// Square millimeters per square meter.
pub const MM2_PER_M2: f64 = 1_000_000.0;

/// Millimeters per meter.
pub const MM_PER_M: f64 = 1_000.0;
