use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::geometry::{Aabb, Polygon};
use crate::layout::{IlotId, Layout};
use crate::math::distance_2d::point_to_segment_dist;
use crate::math::{Point2, TOLERANCE};
use crate::zones::Zones;

/// A placement rule broken by a layout.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    #[error("ilots {a} and {b} are {distance:.1} mm apart")]
    IlotSpacing { a: IlotId, b: IlotId, distance: f64 },

    #[error("ilot {ilot} is {distance:.1} mm from a forbidden zone or entrance")]
    ObstacleClearance { ilot: IlotId, distance: f64 },

    #[error("ilot {ilot} is {distance:.1} mm from a wall")]
    WallClearance { ilot: IlotId, distance: f64 },

    #[error("ilot {ilot} is not inside a room that accepts ilots")]
    Containment { ilot: IlotId },
}

/// Re-checks a finished layout against its zones with exact distances.
///
/// Placement tests clearance with expanded boxes; this measures true
/// polygon distances instead, so it catches anything the box tests let
/// through. An empty result means the layout is sound.
#[derive(Debug)]
pub struct AuditLayout<'a> {
    zones: &'a Zones,
    layout: &'a Layout,
    clearance: f64,
}

impl<'a> AuditLayout<'a> {
    #[must_use]
    pub fn new(zones: &'a Zones, layout: &'a Layout, clearance: f64) -> Self {
        Self {
            zones,
            layout,
            clearance,
        }
    }

    #[must_use]
    pub fn execute(&self) -> Vec<Violation> {
        let ilots = &self.layout.placed_ilots;
        let outlines: Vec<Polygon> = ilots
            .iter()
            .map(|ilot| Polygon::from_aabb(&ilot.bounds()))
            .collect();
        let too_close = |distance: f64| distance + TOLERANCE < self.clearance;
        let mut violations = Vec::new();

        for (i, ilot) in ilots.iter().enumerate() {
            let accepted = self
                .zones
                .room(ilot.room)
                .is_some_and(|room| !room.is_no_entry && room.polygon.contains_aabb(&ilot.bounds()));
            if !accepted {
                violations.push(Violation::Containment { ilot: ilot.id });
            }

            for (j, other) in ilots.iter().enumerate().skip(i + 1) {
                let distance = outlines[i].distance_to(&outlines[j]);
                if too_close(distance) {
                    violations.push(Violation::IlotSpacing {
                        a: ilot.id,
                        b: other.id,
                        distance,
                    });
                }
            }

            if let Some(distance) = self
                .zones
                .obstacles()
                .map(|zone| outlines[i].distance_to(&zone.polygon))
                .reduce(f64::min)
                .filter(|d| too_close(*d))
            {
                violations.push(Violation::ObstacleClearance {
                    ilot: ilot.id,
                    distance,
                });
            }

            let bounds = ilot.bounds();
            if let Some(distance) = self
                .zones
                .walls
                .iter()
                .flat_map(|wall| wall.segments())
                .map(|(a, b)| segment_box_distance(&a, &b, &bounds))
                .reduce(f64::min)
                .filter(|d| too_close(*d))
            {
                violations.push(Violation::WallClearance {
                    ilot: ilot.id,
                    distance,
                });
            }
        }

        for violation in &violations {
            warn!(%violation, "layout violation");
        }
        violations
    }
}

/// Distance from segment `a`–`b` to a box, `0.0` if the segment reaches it.
fn segment_box_distance(a: &Point2, b: &Point2, bounds: &Aabb) -> f64 {
    let touches = |p: &Point2| {
        p.x >= bounds.min.x && p.x <= bounds.max.x && p.y >= bounds.min.y && p.y <= bounds.max.y
    };
    if touches(a) || touches(b) || bounds.intersects_segment(a, b) {
        return 0.0;
    }
    let from_corners = bounds
        .corners()
        .iter()
        .map(|c| point_to_segment_dist(c.x, c.y, a.x, a.y, b.x, b.y))
        .fold(f64::INFINITY, f64::min);
    let from_ends = bounds
        .edges()
        .iter()
        .flat_map(|(e0, e1)| {
            [a, b]
                .map(|p| point_to_segment_dist(p.x, p.y, e0.x, e0.y, e1.x, e1.y))
        })
        .fold(f64::INFINITY, f64::min);
    from_corners.min(from_ends)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::layout::{Measurements, PlacedIlot};
    use crate::zones::{Room, RoomId};

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
        Polygon::new(&[
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ])
        .unwrap()
    }

    fn ilot(id: IlotId, x: f64, y: f64, room: RoomId) -> PlacedIlot {
        PlacedIlot {
            id,
            position: Point2::new(x, y),
            width: 2_000.0,
            height: 1_000.0,
            room,
        }
    }

    fn layout(placed_ilots: Vec<PlacedIlot>) -> Layout {
        Layout {
            placed_ilots,
            corridors: Vec::new(),
            measurements: Measurements::default(),
            unplaced: 0,
        }
    }

    #[test]
    fn sound_layout_has_no_violations() {
        let mut zones = Zones::new();
        let room = zones.add_room(Room::new(rect(0.0, 0.0, 10_000.0, 10_000.0), "R", false));
        zones.add_forbidden(rect(8_000.0, 8_000.0, 10_000.0, 10_000.0), "F");
        let layout = layout(vec![ilot(0, 0.0, 0.0, room), ilot(1, 2_500.0, 0.0, room)]);
        assert!(AuditLayout::new(&zones, &layout, 500.0).execute().is_empty());
    }

    #[test]
    fn reports_spacing_and_obstacles() {
        let mut zones = Zones::new();
        let room = zones.add_room(Room::new(rect(0.0, 0.0, 10_000.0, 10_000.0), "R", false));
        zones.add_entrance(rect(0.0, 1_200.0, 1_000.0, 2_000.0), "E");
        let layout = layout(vec![ilot(0, 0.0, 0.0, room), ilot(1, 2_300.0, 0.0, room)]);
        let violations = AuditLayout::new(&zones, &layout, 500.0).execute();
        assert!(violations.iter().any(|v| matches!(
            v,
            Violation::IlotSpacing { a: 0, b: 1, distance } if (distance - 300.0).abs() < 1e-9
        )));
        assert!(violations.iter().any(|v| matches!(
            v,
            Violation::ObstacleClearance { ilot: 0, distance } if (distance - 200.0).abs() < 1e-9
        )));
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn reports_walls_and_containment() {
        let mut zones = Zones::new();
        let room = zones.add_room(Room::new(rect(0.0, 0.0, 10_000.0, 10_000.0), "R", false));
        let closed = zones.add_room(Room::new(rect(20_000.0, 0.0, 30_000.0, 10_000.0), "WC", true));
        zones.add_wall(
            vec![Point2::new(0.0, 1_100.0), Point2::new(5_000.0, 1_100.0)],
            false,
            "WALL",
        );
        let layout = layout(vec![
            ilot(0, 0.0, 0.0, room),
            ilot(1, 21_000.0, 0.0, closed),
            ilot(2, 9_000.0, 5_000.0, room),
        ]);
        let violations = AuditLayout::new(&zones, &layout, 200.0).execute();
        assert!(violations.contains(&Violation::Containment { ilot: 1 }));
        assert!(violations.contains(&Violation::Containment { ilot: 2 }));
        assert!(violations.iter().any(|v| matches!(
            v,
            Violation::WallClearance { ilot: 0, distance } if (distance - 100.0).abs() < 1e-9
        )));
    }

    #[test]
    fn segment_distance_to_box() {
        let b = Aabb::new(Point2::new(0.0, 0.0), Point2::new(10.0, 10.0));
        let p = |x: f64, y: f64| Point2::new(x, y);
        assert!((segment_box_distance(&p(13.0, -5.0), &p(13.0, 20.0), &b) - 3.0).abs() < 1e-12);
        assert!((segment_box_distance(&p(13.0, 14.0), &p(20.0, 20.0), &b) - 5.0).abs() < 1e-12);
        assert!(segment_box_distance(&p(-5.0, 5.0), &p(15.0, 5.0), &b).abs() < 1e-12);
        assert!(segment_box_distance(&p(5.0, 5.0), &p(6.0, 6.0), &b).abs() < 1e-12);
    }
}
