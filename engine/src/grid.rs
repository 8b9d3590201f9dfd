//! Fixed rectangular voxel grid with hard (no-flux) edges.

use smallvec::SmallVec;

use crate::{cell::Cell, error::ReactorError};

/// How a neighbor touches the center cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborKind {
    /// Shares an edge (distance L between centers).
    Axis,
    /// Shares a corner only (distance √2·L between centers).
    Diagonal,
}

/// An in-bounds Moore neighbor of some cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// Column index
    pub x: usize,
    /// Row index
    pub y: usize,
    /// Axis-aligned or diagonal
    pub kind: NeighborKind,
}

/// Moore offsets, diagonals first.
const MOORE: [(isize, isize, NeighborKind); 8] = [
    (-1, -1, NeighborKind::Diagonal),
    (1, -1, NeighborKind::Diagonal),
    (-1, 1, NeighborKind::Diagonal),
    (1, 1, NeighborKind::Diagonal),
    (-1, 0, NeighborKind::Axis),
    (1, 0, NeighborKind::Axis),
    (0, 1, NeighborKind::Axis),
    (0, -1, NeighborKind::Axis),
];

/// Row-major `width x height` container of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

/// Grid-wide sums used for conservation diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridTotals {
    /// Σ concentration over all cells (mol/dm^3 · cells)
    pub concentration: f64,
    /// Σ product over all cells
    pub product: f64,
    /// Σ temperature over all cells (K · cells)
    pub temperature: f64,
}

impl GridTotals {
    /// Thermal energy content Σ T·C_voxel (J, relative to 0 K).
    pub fn thermal_energy(&self, cell_heat_capacity: f64) -> f64 {
        self.temperature * cell_heat_capacity
    }
}

impl Grid {
    /// Build a grid with every cell set to `cell`. Both dimensions must be at least 1.
    pub fn filled(width: usize, height: usize, cell: Cell) -> Result<Self, ReactorError> {
        if width == 0 {
            return Err(ReactorError::invalid("width", "must be >= 1"));
        }
        if height == 0 {
            return Err(ReactorError::invalid("height", "must be >= 1"));
        }
        Ok(Self { width, height, cells: vec![cell; width * height] })
    }

    /// Width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a grid without cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when `(x, y)` addresses a cell.
    #[inline]
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    pub(crate) fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Bounds-checked read.
    pub fn get(&self, x: usize, y: usize) -> Result<&Cell, ReactorError> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }
        Ok(&self.cells[self.idx(x, y)])
    }

    /// Bounds-checked write access.
    pub fn get_mut(&mut self, x: usize, y: usize) -> Result<&mut Cell, ReactorError> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }
        let i = self.idx(x, y);
        Ok(&mut self.cells[i])
    }

    /// Unchecked read for coordinates already known to be in bounds.
    #[inline]
    pub(crate) fn at(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.idx(x, y)]
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// All cells, row-major, mutable.
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// In-bounds Moore neighbors of `(x, y)`: 3 at a corner, 5 on an edge,
    /// 8 in the interior (fewer on degenerate 1-wide grids).
    pub fn neighbors(&self, x: usize, y: usize) -> SmallVec<[Neighbor; 8]> {
        let mut out = SmallVec::new();
        for &(dx, dy, kind) in &MOORE {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if self.contains(nx, ny) {
                out.push(Neighbor { x: nx as usize, y: ny as usize, kind });
            }
        }
        out
    }

    /// Sum every field over the grid.
    pub fn totals(&self) -> GridTotals {
        self.cells.iter().fold(GridTotals::default(), |mut t, c| {
            t.concentration += c.concentration;
            t.product += c.product;
            t.temperature += c.temperature;
            t
        })
    }

    /// Hottest cell temperature (K).
    pub fn max_temperature(&self) -> f64 {
        self.cells.iter().map(|c| c.temperature).fold(f64::NEG_INFINITY, f64::max)
    }

    /// First cell (row-major) holding a non-finite value.
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        self.cells.iter().position(|c| !c.is_finite()).map(|i| self.coord(i))
    }

    /// First cell (row-major) that is non-finite, at or below 0 K, or holds a
    /// negative species value.
    pub fn first_non_physical(&self) -> Option<(usize, usize)> {
        self.cells.iter().position(|c| !c.is_physical()).map(|i| self.coord(i))
    }

    #[inline]
    fn coord(&self, i: usize) -> (usize, usize) {
        (i % self.width, i / self.width)
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> ReactorError {
        ReactorError::OutOfBounds { x, y, width: self.width, height: self.height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_are_in_bounds_and_unique() -> Result<(), ReactorError> {
        let g = Grid::filled(4, 3, Cell::default())?;
        for y in 0..3 {
            for x in 0..4 {
                let n = g.neighbors(x, y);
                for a in &n {
                    assert!(a.x < 4 && a.y < 3);
                    assert!((a.x, a.y) != (x, y));
                    assert_eq!(n.iter().filter(|b| (b.x, b.y) == (a.x, a.y)).count(), 1);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() -> Result<(), ReactorError> {
        let g = Grid::filled(1, 1, Cell::default())?;
        assert!(g.neighbors(0, 0).is_empty());
        Ok(())
    }

    #[test]
    fn empty_dimensions_are_rejected() {
        assert!(matches!(
            Grid::filled(0, 4, Cell::default()),
            Err(ReactorError::InvalidConfiguration { field: "width", .. })
        ));
        assert!(matches!(
            Grid::filled(4, 0, Cell::default()),
            Err(ReactorError::InvalidConfiguration { field: "height", .. })
        ));
    }

    #[test]
    fn first_non_finite_reports_coordinates() -> Result<(), ReactorError> {
        let mut g = Grid::filled(3, 2, Cell::new(1.0, 300.0))?;
        assert_eq!(g.first_non_finite(), None);
        g.get_mut(2, 1)?.temperature = f64::NAN;
        assert_eq!(g.first_non_finite(), Some((2, 1)));
        Ok(())
    }

    #[test]
    fn first_non_physical_catches_finite_sub_zero_temperature() -> Result<(), ReactorError> {
        let mut g = Grid::filled(3, 2, Cell::new(1.0, 300.0))?;
        assert_eq!(g.first_non_physical(), None);
        g.get_mut(1, 1)?.temperature = -12.5;
        assert_eq!(g.first_non_finite(), None);
        assert_eq!(g.first_non_physical(), Some((1, 1)));
        g.get_mut(0, 1)?.concentration = -0.1;
        assert_eq!(g.first_non_physical(), Some((0, 1)));
        Ok(())
    }
}
