use ahash::AHashMap;

use crate::geometry::Aabb;

/// Sparse uniform grid over placed boxes.
///
/// A box is registered in every cell it touches, so a query only has to
/// look at the cells covered by the query box. Results may repeat an index
/// when a box spans several cells.
#[derive(Debug)]
pub struct SpatialIndex {
    cell_size: f64,
    cells: AHashMap<(i64, i64), Vec<usize>>,
}

impl SpatialIndex {
    /// Creates an empty index. `cell_size` should be on the order of the
    /// largest box that will be inserted.
    #[must_use]
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size: cell_size.max(f64::MIN_POSITIVE),
            cells: AHashMap::new(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell_coord(&self, v: f64) -> i64 {
        (v / self.cell_size).floor() as i64
    }

    fn cell_range(&self, b: &Aabb) -> (i64, i64, i64, i64) {
        (
            self.cell_coord(b.min.x),
            self.cell_coord(b.min.y),
            self.cell_coord(b.max.x),
            self.cell_coord(b.max.y),
        )
    }

    /// Registers `index` under every cell overlapped by `bounds`.
    pub fn insert(&mut self, index: usize, bounds: &Aabb) {
        let (x0, y0, x1, y1) = self.cell_range(bounds);
        for cx in x0..=x1 {
            for cy in y0..=y1 {
                self.cells.entry((cx, cy)).or_default().push(index);
            }
        }
    }

    /// Indices registered in the cells covered by `bounds`.
    pub fn query(&self, bounds: &Aabb) -> impl Iterator<Item = usize> + '_ {
        let (x0, y0, x1, y1) = self.cell_range(bounds);
        (x0..=x1).flat_map(move |cx| {
            (y0..=y1).flat_map(move |cy| self.cells.get(&(cx, cy)).into_iter().flatten().copied())
        })
    }

}
