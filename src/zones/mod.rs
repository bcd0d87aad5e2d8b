mod classify;

pub use classify::{Classification, ClassifyZones};

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::geometry::{Aabb, Polygon};
use crate::math::{Point2, MM2_PER_M2};

slotmap::new_key_type! {
    /// Unique identifier for a room in a [`Zones`] store.
    pub struct RoomId;
}

/// What a piece of input geometry represents on the floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    Wall,
    Forbidden,
    Entrance,
    Room,
}

impl ZoneKind {
    /// Maps the drawing colour code: black walls, blue forbidden zones,
    /// red entrances. Any other colour carries no zone meaning.
    #[must_use]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Option<Self> {
        match (r, g, b) {
            (0, 0, 0) => Some(Self::Wall),
            (0, 0, 255) => Some(Self::Forbidden),
            (255, 0, 0) => Some(Self::Entrance),
            _ => None,
        }
    }
}

/// How an input entity is tagged upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityTag {
    /// Explicit zone kind.
    Kind(ZoneKind),
    /// Drawing colour, resolved with [`ZoneKind::from_rgb`].
    Color([u8; 3]),
}

impl EntityTag {
    #[must_use]
    pub fn kind(self) -> Option<ZoneKind> {
        match self {
            Self::Kind(kind) => Some(kind),
            Self::Color([r, g, b]) => ZoneKind::from_rgb(r, g, b),
        }
    }
}

/// One unclassified piece of input geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntity {
    pub points: Vec<Point2>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub layer: String,
    pub tag: EntityTag,
}

impl RawEntity {
    #[must_use]
    pub fn new(kind: ZoneKind, points: Vec<Point2>, layer: impl Into<String>) -> Self {
        Self {
            points,
            closed: true,
            layer: layer.into(),
            tag: EntityTag::Kind(kind),
        }
    }
}

/// A closed obstacle polygon: a forbidden zone or an entrance.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub kind: ZoneKind,
    pub polygon: Polygon,
    pub layer: String,
}

/// A wall, kept as a polyline because walls need not be closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    pub points: Vec<Point2>,
    pub closed: bool,
    pub layer: String,
}

impl Wall {
    /// Wall segments as `(start, end)` pairs, including the closing segment
    /// when the wall is closed.
    pub fn segments(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.points.len();
        let count = match n {
            0 | 1 => 0,
            2 => 1,
            _ if self.closed => n,
            _ => n - 1,
        };
        (0..count).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

/// A room an ilot may be placed in, unless it is marked no-entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub polygon: Polygon,
    pub layer: String,
    pub is_no_entry: bool,
    /// Area in m².
    pub area: f64,
    pub centroid: Point2,
}

impl Room {
    #[must_use]
    pub fn new(polygon: Polygon, layer: impl Into<String>, is_no_entry: bool) -> Self {
        let area = polygon.area() / MM2_PER_M2;
        let centroid = polygon.centroid();
        Self {
            polygon,
            layer: layer.into(),
            is_no_entry,
            area,
            centroid,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.polygon.bounds()
    }
}

/// Classified floor-plan geometry for one run.
#[derive(Debug, Clone, Default)]
pub struct Zones {
    rooms: SlotMap<RoomId, Room>,
    pub forbidden: Vec<Zone>,
    pub entrances: Vec<Zone>,
    pub walls: Vec<Wall>,
}

impl Zones {
    /// Creates an empty zone set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a room and returns its ID.
    pub fn add_room(&mut self, room: Room) -> RoomId {
        self.rooms.insert(room)
    }

    /// Adds a forbidden zone.
    pub fn add_forbidden(&mut self, polygon: Polygon, layer: impl Into<String>) {
        self.forbidden.push(Zone {
            kind: ZoneKind::Forbidden,
            polygon,
            layer: layer.into(),
        });
    }

    /// Adds an entrance zone.
    pub fn add_entrance(&mut self, polygon: Polygon, layer: impl Into<String>) {
        self.entrances.push(Zone {
            kind: ZoneKind::Entrance,
            polygon,
            layer: layer.into(),
        });
    }

    /// Adds a wall polyline.
    pub fn add_wall(&mut self, points: Vec<Point2>, closed: bool, layer: impl Into<String>) {
        self.walls.push(Wall {
            points,
            closed,
            layer: layer.into(),
        });
    }

    #[must_use]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// All rooms in insertion order.
    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms.iter()
    }

    /// Rooms that accept ilots, in insertion order.
    pub fn placeable_rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms.iter().filter(|(_, room)| !room.is_no_entry)
    }

    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Forbidden zones and entrances together.
    pub fn obstacles(&self) -> impl Iterator<Item = &Zone> {
        self.forbidden.iter().chain(&self.entrances)
    }

    /// Summed area of every room, in m².
    #[must_use]
    pub fn total_room_area(&self) -> f64 {
        self.rooms.values().map(|room| room.area).sum()
    }

    /// Summed area of rooms that accept ilots, in m².
    #[must_use]
    pub fn walkable_area(&self) -> f64 {
        self.placeable_rooms().map(|(_, room)| room.area).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> Polygon {
        Polygon::new(&[
            Point2::new(x, y),
            Point2::new(x + size, y),
            Point2::new(x + size, y + size),
            Point2::new(x, y + size),
        ])
        .unwrap()
    }

    #[test]
    fn colour_codes() {
        assert_eq!(ZoneKind::from_rgb(0, 0, 0), Some(ZoneKind::Wall));
        assert_eq!(ZoneKind::from_rgb(0, 0, 255), Some(ZoneKind::Forbidden));
        assert_eq!(ZoneKind::from_rgb(255, 0, 0), Some(ZoneKind::Entrance));
        assert_eq!(ZoneKind::from_rgb(0, 255, 0), None);
    }

    #[test]
    fn entity_tag_serde() {
        let tag: EntityTag = serde_json::from_str(r#"{"kind":"forbidden"}"#).unwrap();
        assert_eq!(tag.kind(), Some(ZoneKind::Forbidden));
        let tag: EntityTag = serde_json::from_str(r#"{"color":[255,0,0]}"#).unwrap();
        assert_eq!(tag.kind(), Some(ZoneKind::Entrance));
    }

    #[test]
    fn room_area_in_square_meters() {
        let room = Room::new(square(0.0, 0.0, 10_000.0), "OFFICE", false);
        assert!((room.area - 100.0).abs() < 1e-9);
        assert!((room.centroid.x - 5_000.0).abs() < 1e-9);
    }

    #[test]
    fn walkable_area_skips_no_entry_rooms() {
        let mut zones = Zones::new();
        zones.add_room(Room::new(square(0.0, 0.0, 10_000.0), "OFFICE", false));
        zones.add_room(Room::new(square(20_000.0, 0.0, 5_000.0), "STAIRS", true));
        assert!((zones.total_room_area() - 125.0).abs() < 1e-9);
        assert!((zones.walkable_area() - 100.0).abs() < 1e-9);
        assert_eq!(zones.placeable_rooms().count(), 1);
    }

    #[test]
    fn wall_segments_open_and_closed() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
        ];
        let open = Wall {
            points: points.clone(),
            closed: false,
            layer: String::new(),
        };
        let closed = Wall {
            points,
            closed: true,
            layer: String::new(),
        };
        assert_eq!(open.segments().count(), 2);
        assert_eq!(closed.segments().count(), 3);
    }
}
