//! Rectangular grid of cells with fixed lattice adjacency and carved links.
//!
//! A [`Grid`] is a snapshot value. Cloning one is cheap (the cell storage is shared
//! behind an [`Arc`]) and any later mutation through [`Grid::link`] or
//! [`Grid::annotate`] copies the storage first if another snapshot still refers to
//! it. A consumer holding an older snapshot therefore never observes later writes.

pub mod cell;

use std::{collections::BTreeSet, sync::Arc};

pub use cell::Cell;

use crate::error::{MazeError, Result};

/// A `(row, column)` lattice position. Row 0 is the northern edge.
pub type Coord = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub(crate) const fn bit(self) -> u8 {
        match self {
            Direction::North => 1,
            Direction::South => 2,
            Direction::East => 4,
            Direction::West => 8,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// The coordinate one step away in this direction, ignoring grid bounds.
    /// Returns `None` only when the step would leave the non-negative quadrant.
    pub fn step(self, coord: Coord) -> Option<Coord> {
        let (row, column) = coord;
        match self {
            Direction::North => row.checked_sub(1).map(|r| (r, column)),
            Direction::South => row.checked_add(1).map(|r| (r, column)),
            Direction::East => column.checked_add(1).map(|c| (row, c)),
            Direction::West => column.checked_sub(1).map(|c| (row, c)),
        }
    }

    /// The direction leading from `from` to an adjacent `to`, if they are adjacent.
    pub fn between(from: Coord, to: Coord) -> Option<Self> {
        Direction::ALL
            .into_iter()
            .find(|d| d.step(from) == Some(to))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Arc<Vec<Cell>>,
    algorithm: Option<&'static str>,
    changed: BTreeSet<Coord>,
}

impl Grid {
    /// Creates a fresh grid: every cell unlinked, no algorithm recorded and no changed cells.
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(MazeError::InvalidDimension { rows, columns });
        }
        let in_bounds = |(r, c): Coord| r < rows && c < columns;
        let cells = (0..rows)
            .flat_map(|row| (0..columns).map(move |column| (row, column)))
            .map(|coord| {
                let neighbors = Direction::ALL
                    .into_iter()
                    .filter(|d| d.step(coord).is_some_and(in_bounds))
                    .fold(0, |bits, d| bits | d.bit());
                Cell::new(coord, neighbors)
            })
            .collect::<Vec<_>>();
        Ok(Grid {
            rows,
            columns,
            cells: Arc::new(cells),
            algorithm: None,
            changed: BTreeSet::new(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of cells in the grid.
    pub fn size(&self) -> usize {
        self.rows * self.columns
    }

    /// Name of the algorithm that carved this grid, `None` for a fresh grid.
    pub fn algorithm(&self) -> Option<&'static str> {
        self.algorithm
    }

    pub(crate) fn set_algorithm(&mut self, name: &'static str) {
        self.algorithm = Some(name);
    }

    /// Coordinates whose links or annotation differ from the snapshot this one was derived from.
    pub fn changed_cells(&self) -> &BTreeSet<Coord> {
        &self.changed
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.rows && coord.1 < self.columns
    }

    fn ravel_index(&self, coord: Coord) -> usize {
        coord.0 * self.columns + coord.1
    }

    fn check_bounds(&self, coord: Coord) -> Result<usize> {
        if self.is_in_bounds(coord) {
            Ok(self.ravel_index(coord))
        } else {
            Err(MazeError::OutOfBounds {
                coord,
                rows: self.rows,
                columns: self.columns,
            })
        }
    }

    pub fn lookup(&self, coord: Coord) -> Result<&Cell> {
        let idx = self.check_bounds(coord)?;
        Ok(&self.cells[idx])
    }

    /// All coordinates in row-major order. Several generators depend on this exact order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |column| (row, column)))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// The neighbor of `coord` in `direction`, if it lies inside the grid.
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        direction.step(coord).filter(|&c| self.is_in_bounds(c))
    }

    /// Structural neighbors of `coord`. Yields nothing if `coord` is out of bounds.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.lookup(coord).ok().into_iter().flat_map(Cell::neighbors)
    }

    /// Linked neighbors of `coord`. Yields nothing if `coord` is out of bounds.
    pub fn links(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.lookup(coord).ok().into_iter().flat_map(Cell::links)
    }

    pub fn is_linked(&self, a: Coord, b: Coord) -> bool {
        self.lookup(a).is_ok_and(|cell| cell.is_linked(b))
    }

    /// Carves a passage between two adjacent cells.
    ///
    /// The changed cells of the resulting snapshot are exactly `{a, b}`, or empty if the
    /// two cells were already linked. Returns whether a new link was carved.
    pub fn link(&mut self, a: Coord, b: Coord) -> Result<bool> {
        let idx_a = self.check_bounds(a)?;
        let idx_b = self.check_bounds(b)?;
        let direction = Direction::between(a, b)
            .ok_or(MazeError::NotNeighbors { from: a, to: b })?;

        self.changed.clear();
        if self.cells[idx_a].is_linked_toward(direction) {
            return Ok(false);
        }
        let cells = Arc::make_mut(&mut self.cells);
        cells[idx_a].add_link(direction);
        cells[idx_b].add_link(direction.opposite());
        self.changed.extend([a, b]);
        Ok(true)
    }

    /// Sets the annotation of every named cell. Links are never touched.
    ///
    /// The changed cells of the resulting snapshot are those whose annotation actually
    /// changed. Fails without modifying the grid if any coordinate is out of bounds.
    pub fn annotate<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (Coord, usize)>,
    {
        let updates = values
            .into_iter()
            .map(|(coord, value)| -> Result<_> { Ok((self.check_bounds(coord)?, coord, value)) })
            .collect::<Result<Vec<_>>>()?;

        self.changed.clear();
        let cells = Arc::make_mut(&mut self.cells);
        for (idx, coord, value) in updates {
            if cells[idx].set_annotation(value) {
                self.changed.insert(coord);
            }
        }
        Ok(())
    }

    /// This snapshot with every annotation removed and no changed cells.
    pub fn without_annotations(&self) -> Grid {
        let mut grid = self.clone();
        grid.changed.clear();
        if grid.cells.iter().any(|cell| cell.annotation().is_some()) {
            Arc::make_mut(&mut grid.cells)
                .iter_mut()
                .for_each(Cell::clear_annotation);
        }
        grid
    }

    /// Total number of links. Each link is counted once.
    pub fn link_count(&self) -> usize {
        self.cells.iter().map(Cell::link_count).sum::<usize>() / 2
    }

    /// Cells with exactly one link, in row-major order.
    pub fn dead_ends(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .filter(|cell| cell.link_count() == 1)
            .map(Cell::coord)
            .collect()
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Cell;

    /// Panics if `coord` is out of bounds. Use [`Grid::lookup`] for a fallible access.
    fn index(&self, coord: Coord) -> &Self::Output {
        &self.cells[self.ravel_index(coord)]
    }
}
