use crate::layout::{Corridor, Measurements, PlacedIlot};
use crate::math::{MM2_PER_M2, MM_PER_M};
use crate::zones::Zones;

/// Aggregates areas and lengths of a finished layout.
///
/// Corridor sums are taken in millimetres and converted once at the end.
#[derive(Debug)]
pub struct Measure<'a> {
    zones: &'a Zones,
    ilots: &'a [PlacedIlot],
    corridors: &'a [Corridor],
}

impl<'a> Measure<'a> {
    #[must_use]
    pub fn new(zones: &'a Zones, ilots: &'a [PlacedIlot], corridors: &'a [Corridor]) -> Self {
        Self {
            zones,
            ilots,
            corridors,
        }
    }

    #[must_use]
    pub fn execute(&self) -> Measurements {
        let total_area = self.zones.total_room_area();
        let ilot_area: f64 = self.ilots.iter().map(PlacedIlot::area).sum();
        let corridor_mm: f64 = self.corridors.iter().map(Corridor::length).sum();
        let corridor_area = self
            .corridors
            .iter()
            .map(|c| c.width * c.length())
            .sum::<f64>()
            / MM2_PER_M2;

        Measurements {
            total_area,
            walkable_area: total_area - ilot_area,
            ilot_area,
            corridor_area,
            number_of_ilots: self.ilots.len(),
            corridor_length: corridor_mm / MM_PER_M,
        }
    }
}
