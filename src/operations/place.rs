use rayon::prelude::*;
use tracing::{debug, info};

use super::generate::IlotRequest;
use super::spatial_index::SpatialIndex;
use crate::geometry::{Aabb, Polygon};
use crate::layout::PlacedIlot;
use crate::math::{Point2, MM2_PER_M2, MM_PER_M, TOLERANCE};
use crate::settings::Settings;
use crate::zones::{Room, RoomId, Zones};

/// Ilot height as a fraction of its width.
pub const ASPECT_RATIO: f64 = 0.7;

/// An ilot's width may not exceed this fraction of the square root of the
/// room area, so small rooms only take small ilots.
pub const ROOM_FIT_RATIO: f64 = 0.6;

/// Candidate positions are spaced at this fraction of the smallest
/// requested ilot height.
pub const SCAN_SUBDIVISIONS: f64 = 4.0;

/// Rectangle dimensions of an ilot, in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IlotSize {
    pub width: f64,
    pub height: f64,
}

impl IlotSize {
    /// Sizes an ilot for a target area in m²: the width is the side of the
    /// equivalent square, clamped to the configured size range, and the
    /// height follows [`ASPECT_RATIO`].
    #[must_use]
    pub fn for_area(area: f64, settings: &Settings) -> Self {
        let side = area.max(0.0).sqrt() * MM_PER_M;
        let width = side.max(settings.min_ilot_size).min(settings.max_ilot_size);
        Self {
            width,
            height: width * ASPECT_RATIO,
        }
    }
}

/// Result of [`PlaceIlots`].
#[derive(Debug, Clone, Default)]
pub struct Placement {
    /// Committed ilots in placement (largest-first) order.
    pub ilots: Vec<PlacedIlot>,
    /// Requests that found no valid position in any room.
    pub unplaced: usize,
}

/// Read-only view of one placeable room and the obstacles near it.
struct RoomSite<'a> {
    id: RoomId,
    room: &'a Room,
    bounds: Aabb,
    max_ilot_width: f64,
    obstacles: Vec<&'a Polygon>,
    wall_segments: Vec<(Point2, Point2)>,
}

impl RoomSite<'_> {
    fn accepts(&self, size: IlotSize) -> bool {
        size.width <= self.max_ilot_width + TOLERANCE
            && size.width <= self.bounds.width() + TOLERANCE
            && size.height <= self.bounds.height() + TOLERANCE
    }

    fn clear_of_obstacles(&self, expanded: &Aabb) -> bool {
        !self.obstacles.iter().any(|zone| zone.intersects_aabb(expanded))
            && !self
                .wall_segments
                .iter()
                .any(|(a, b)| expanded.intersects_segment(a, b))
    }
}

/// Shared, read-only state while a request is searched for.
struct Occupancy<'a> {
    ilots: &'a [PlacedIlot],
    index: &'a SpatialIndex,
}

impl Occupancy<'_> {
    /// Right edge of the furthest-reaching placed ilot overlapping `expanded`.
    fn blocking_right_edge(&self, expanded: &Aabb) -> Option<f64> {
        self.index
            .query(expanded)
            .map(|i| self.ilots[i].bounds())
            .filter(|b| b.overlaps(expanded))
            .map(|b| b.max.x)
            .reduce(f64::max)
    }
}

/// Deterministic largest-first, first-fit ilot placement.
///
/// Requests are taken by descending area (ties in generation order). Each
/// is tried in the placeable rooms in order; inside a room, candidate
/// positions are scanned bottom-to-top, left-to-right over the room's
/// bounding box. A candidate is accepted when the rectangle lies inside the
/// room, its clearance-expanded rectangle misses every forbidden zone,
/// entrance and wall, and it keeps the clearance to every placed ilot.
#[derive(Debug)]
pub struct PlaceIlots<'a> {
    zones: &'a Zones,
    settings: &'a Settings,
    requests: &'a [IlotRequest],
}

impl<'a> PlaceIlots<'a> {
    /// Creates a new placement operation.
    #[must_use]
    pub fn new(zones: &'a Zones, settings: &'a Settings, requests: &'a [IlotRequest]) -> Self {
        Self {
            zones,
            settings,
            requests,
        }
    }

    /// Executes the placement.
    #[must_use]
    pub fn execute(&self) -> Placement {
        let mut placement = Placement::default();
        if self.requests.is_empty() {
            return placement;
        }

        let clearance = self.settings.ilot_clearance;
        let mut order: Vec<(IlotRequest, IlotSize)> = self
            .requests
            .iter()
            .map(|r| (*r, IlotSize::for_area(r.area, self.settings)))
            .collect();
        order.sort_by(|(a, _), (b, _)| {
            b.area
                .total_cmp(&a.area)
                .then_with(|| a.sequence.cmp(&b.sequence))
        });

        let smallest = order
            .iter()
            .map(|(_, size)| size.height)
            .fold(f64::INFINITY, f64::min);
        let largest = order
            .iter()
            .map(|(_, size)| size.width)
            .fold(0.0, f64::max);
        let step = smallest / SCAN_SUBDIVISIONS;
        if !step.is_finite() || step <= 0.0 {
            placement.unplaced = order.len();
            return placement;
        }

        let sites = self.room_sites();
        let mut index = SpatialIndex::new(largest + 2.0 * clearance);

        for (request, size) in &order {
            let occupancy = Occupancy {
                ilots: &placement.ilots,
                index: &index,
            };
            let found = sites.par_iter().find_map_first(|site| {
                if !site.accepts(*size) {
                    return None;
                }
                scan_room(site, *size, clearance, step, &occupancy).map(|pos| (site.id, pos))
            });

            match found {
                Some((room, position)) => {
                    let ilot = PlacedIlot {
                        id: placement.ilots.len(),
                        position,
                        width: size.width,
                        height: size.height,
                        room,
                    };
                    index.insert(ilot.id, &ilot.bounds());
                    placement.ilots.push(ilot);
                }
                None => {
                    debug!(
                        sequence = request.sequence,
                        area = request.area,
                        "no valid position for ilot"
                    );
                    placement.unplaced += 1;
                }
            }
        }

        info!(
            placed = placement.ilots.len(),
            unplaced = placement.unplaced,
            rooms = sites.len(),
            "ilot placement finished"
        );
        placement
    }

    fn room_sites(&self) -> Vec<RoomSite<'a>> {
        let clearance = self.settings.ilot_clearance;
        let zones = self.zones;
        zones
            .placeable_rooms()
            .map(|(id, room)| {
                let bounds = room.bounds();
                let reach = bounds.expanded(clearance);
                let obstacles = zones
                    .obstacles()
                    .map(|zone| &zone.polygon)
                    .filter(|polygon| polygon.bounds().overlaps(&reach))
                    .collect();
                let wall_segments = zones
                    .walls
                    .iter()
                    .flat_map(|wall| wall.segments())
                    .filter(|(a, b)| Aabb::new(*a, *b).expanded(TOLERANCE).overlaps(&reach))
                    .collect();
                RoomSite {
                    id,
                    room,
                    bounds,
                    max_ilot_width: (room.area * MM2_PER_M2).sqrt() * ROOM_FIT_RATIO,
                    obstacles,
                    wall_segments,
                }
            })
            .collect()
    }
}

/// Scans one room for the first valid bottom-left corner.
///
/// When a placed ilot blocks a candidate, every candidate further along the
/// row up to that ilot's right edge plus the clearance is blocked by it too,
/// so the scan jumps straight to the first column past it.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn scan_room(
    site: &RoomSite<'_>,
    size: IlotSize,
    clearance: f64,
    step: f64,
    occupancy: &Occupancy<'_>,
) -> Option<Point2> {
    let origin = site.bounds.min;
    let columns = ((site.bounds.width() - size.width) / step + TOLERANCE).floor() as u64;
    let rows = ((site.bounds.height() - size.height) / step + TOLERANCE).floor() as u64;

    for row in 0..=rows {
        let y = origin.y + row as f64 * step;
        let mut col = 0;
        while col <= columns {
            let position = Point2::new(origin.x + col as f64 * step, y);
            let rect = Aabb::from_origin_size(position, size.width, size.height);
            let expanded = rect.expanded(clearance);

            if let Some(right) = occupancy.blocking_right_edge(&expanded) {
                let past = ((right + clearance - origin.x) / step - TOLERANCE).ceil();
                col = (past.max(0.0) as u64).max(col + 1);
                continue;
            }
            if site.room.polygon.contains_aabb(&rect) && site.clear_of_obstacles(&expanded) {
                return Some(position);
            }
            col += 1;
        }
    }
    None
}
