use std::collections::BTreeMap;

use tracing::debug;

use crate::layout::{Corridor, PlacedIlot};

/// Height of the horizontal bands ilots are grouped into, in mm.
pub const ROW_BUCKET_HEIGHT: f64 = 10_000.0;

/// Neighbours closer than this (edge to edge, in mm) face each other
/// across an aisle.
pub const FACING_THRESHOLD: f64 = 5_000.0;

/// Joins facing ilots in the same row with corridors.
///
/// Ilots are bucketed into rows on `floor(y / ROW_BUCKET_HEIGHT)` and sorted
/// by x inside each row. Only adjacent pairs are considered. A pair faces
/// when the gap between the right edge of the left ilot and the left edge of
/// the right one is positive and below [`FACING_THRESHOLD`]; overlapping
/// (stacked) pairs never do.
#[derive(Debug)]
pub struct SynthesizeCorridors<'a> {
    ilots: &'a [PlacedIlot],
    width: f64,
}

impl<'a> SynthesizeCorridors<'a> {
    #[must_use]
    pub fn new(ilots: &'a [PlacedIlot], width: f64) -> Self {
        Self { ilots, width }
    }

    /// Executes the synthesis. Corridors come out row by row, bottom row
    /// first, left to right.
    #[must_use]
    pub fn execute(&self) -> Vec<Corridor> {
        let mut corridors = Vec::new();

        for (bucket, mut row) in self.rows() {
            row.sort_by(|a, b| {
                a.position
                    .x
                    .total_cmp(&b.position.x)
                    .then_with(|| a.id.cmp(&b.id))
            });
            let before = corridors.len();
            for pair in row.windows(2) {
                let (left, right) = (pair[0], pair[1]);
                let gap = right.position.x - (left.position.x + left.width);
                if gap > 0.0 && gap < FACING_THRESHOLD {
                    corridors.push(Corridor {
                        start: left.right_midpoint(),
                        end: right.left_midpoint(),
                        width: self.width,
                        from: left.id,
                        to: right.id,
                    });
                }
            }
            debug!(
                bucket,
                ilots = row.len(),
                corridors = corridors.len() - before,
                "row corridors"
            );
        }

        corridors
    }

    #[allow(clippy::cast_possible_truncation)]
    fn rows(&self) -> BTreeMap<i64, Vec<&'a PlacedIlot>> {
        let mut rows: BTreeMap<i64, Vec<&'a PlacedIlot>> = BTreeMap::new();
        for ilot in self.ilots {
            let bucket = (ilot.position.y / ROW_BUCKET_HEIGHT).floor() as i64;
            rows.entry(bucket).or_default().push(ilot);
        }
        rows
    }
}
