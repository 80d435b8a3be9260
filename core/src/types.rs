use core::ops::RangeInclusive;

/// Single coordinate axis used for board rows, columns and positions.
pub type Coord = u8;

/// Count type used for mine, flag and revealed-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Chebyshev distance between two cells, the metric of the 8-neighborhood.
pub const fn chebyshev(a: Coord2, b: Coord2) -> Coord {
    let dr = a.0.abs_diff(b.0);
    let dc = a.1.abs_diff(b.1);
    if dr > dc { dr } else { dc }
}

/// Axis range `center-1..=center+1` clipped to `0..len`.
fn clipped_span(center: Coord, len: Coord) -> RangeInclusive<Coord> {
    let lo = center.saturating_sub(1);
    let hi = center.saturating_add(1).min(len.saturating_sub(1));
    lo..=hi
}

/// Iterates the up-to-8 in-bounds neighbors of a cell, row by row.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    rows: RangeInclusive<Coord>,
    cols: RangeInclusive<Coord>,
    row: Option<Coord>,
    col_cursor: RangeInclusive<Coord>,
}

impl NeighborIter {
    pub fn new(center: Coord2, size: Coord2) -> Self {
        let mut rows = clipped_span(center.0, size.0);
        let cols = clipped_span(center.1, size.1);
        let row = if size.0 == 0 || size.1 == 0 {
            None
        } else {
            rows.next()
        };
        Self {
            center,
            rows,
            col_cursor: cols.clone(),
            cols,
            row,
        }
    }

    /// Same window, including the center cell itself.
    pub fn with_center(center: Coord2, size: Coord2) -> impl Iterator<Item = Coord2> {
        let in_bounds = center.0 < size.0 && center.1 < size.1;
        in_bounds
            .then_some(center)
            .into_iter()
            .chain(Self::new(center, size))
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let row = self.row?;
            match self.col_cursor.next() {
                Some(col) if (row, col) == self.center => continue,
                Some(col) => return Some((row, col)),
                None => {
                    self.row = self.rows.next();
                    self.col_cursor = self.cols.clone();
                }
            }
        }
    }
}
