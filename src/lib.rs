pub mod engine;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod math;
pub mod operations;
pub mod settings;
pub mod zones;

pub use engine::{run, run_entities};
pub use error::{LayoutError, Result};
pub use layout::{Corridor, Layout, Measurements, PlacedIlot};
pub use settings::{Settings, SizeCategory};
pub use zones::{RawEntity, Zones};
