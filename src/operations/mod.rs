mod audit;
mod corridors;
mod generate;
mod measure;
mod place;
mod spatial_index;

pub use audit::{AuditLayout, Violation};
pub use corridors::{SynthesizeCorridors, FACING_THRESHOLD, ROW_BUCKET_HEIGHT};
pub use generate::{GenerateIlots, IlotRequest};
pub use measure::Measure;
pub use place::{IlotSize, PlaceIlots, Placement, ASPECT_RATIO, ROOM_FIT_RATIO, SCAN_SUBDIVISIONS};
pub use spatial_index::SpatialIndex;
