use tracing::{debug, warn};

use super::{RawEntity, Room, ZoneKind, Zones};
use crate::error::GeometryError;
use crate::geometry::Polygon;
use crate::math::{TOLERANCE, MM2_PER_M2};
use crate::settings::Settings;

/// Closed outlines at or below this area (m²) are not rooms.
pub const MIN_ROOM_AREA: f64 = 5.0;

/// Layer-name fragments of structural elements (walls, doors, windows),
/// in English and French.
const STRUCTURAL_LAYER_FRAGMENTS: [&str; 8] = [
    "WALL", "MUR", "CLOISON", "DOOR", "PORTE", "ENTREE", "WINDOW", "FENETRE",
];

/// `true` if the layer name marks a structural element.
#[must_use]
pub fn is_structural_layer(layer: &str) -> bool {
    let layer = layer.to_uppercase();
    STRUCTURAL_LAYER_FRAGMENTS
        .iter()
        .any(|fragment| layer.contains(fragment))
}

/// Result of [`ClassifyZones`].
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub zones: Zones,
    /// Entities dropped for malformed geometry.
    pub dropped: usize,
    /// Closed outlines too small to be rooms.
    pub undersized: usize,
    /// Entities with no zone meaning.
    pub ignored: usize,
}

/// Partitions raw entities into walls, forbidden zones, entrances and rooms.
///
/// Entities tagged with a colour that has no zone meaning fall back to their
/// layer: a structural layer makes a wall, any other closed outline is a
/// room candidate. Malformed geometry is dropped, never fatal.
#[derive(Debug)]
pub struct ClassifyZones<'a> {
    entities: &'a [RawEntity],
    settings: &'a Settings,
}

impl<'a> ClassifyZones<'a> {
    /// Creates a new classification operation.
    #[must_use]
    pub fn new(entities: &'a [RawEntity], settings: &'a Settings) -> Self {
        Self { entities, settings }
    }

    /// Executes the classification.
    #[must_use]
    pub fn execute(&self) -> Classification {
        let mut out = Classification::default();

        for (index, entity) in self.entities.iter().enumerate() {
            let kind = match entity.tag.kind() {
                Some(kind) => kind,
                None if is_structural_layer(&entity.layer) => ZoneKind::Wall,
                None if is_closed(entity) => ZoneKind::Room,
                None => {
                    out.ignored += 1;
                    continue;
                }
            };

            if kind == ZoneKind::Wall {
                if entity.points.len() < 2 {
                    warn!(index, layer = %entity.layer, "dropping wall with fewer than 2 points");
                    out.dropped += 1;
                } else {
                    out.zones
                        .add_wall(entity.points.clone(), entity.closed, entity.layer.clone());
                }
                continue;
            }

            let polygon = match closed_polygon(entity) {
                Ok(polygon) => polygon,
                Err(err) => {
                    warn!(index, layer = %entity.layer, ?kind, %err, "dropping malformed zone");
                    out.dropped += 1;
                    continue;
                }
            };

            match kind {
                ZoneKind::Forbidden => out.zones.add_forbidden(polygon, entity.layer.clone()),
                ZoneKind::Entrance => out.zones.add_entrance(polygon, entity.layer.clone()),
                ZoneKind::Room | ZoneKind::Wall => {
                    if polygon.area() / MM2_PER_M2 <= MIN_ROOM_AREA {
                        debug!(index, layer = %entity.layer, "outline too small for a room");
                        out.undersized += 1;
                        continue;
                    }
                    let no_entry = self.settings.is_no_entry_layer(&entity.layer);
                    out.zones
                        .add_room(Room::new(polygon, entity.layer.clone(), no_entry));
                }
            }
        }

        debug!(
            rooms = out.zones.room_count(),
            forbidden = out.zones.forbidden.len(),
            entrances = out.zones.entrances.len(),
            walls = out.zones.walls.len(),
            dropped = out.dropped,
            "classified zones"
        );
        out
    }
}

/// An outline counts as closed when flagged so or when its last point
/// returns to the first.
fn is_closed(entity: &RawEntity) -> bool {
    entity.closed
        || match (entity.points.first(), entity.points.last()) {
            (Some(first), Some(last)) => {
                entity.points.len() > 3 && (first - last).norm() < TOLERANCE
            }
            _ => false,
        }
}

fn closed_polygon(entity: &RawEntity) -> Result<Polygon, GeometryError> {
    if !is_closed(entity) {
        return Err(GeometryError::NotClosed);
    }
    Polygon::new(&entity.points)
}
