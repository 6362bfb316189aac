use super::{Coord, Direction};

/// A single lattice position together with its structural neighbors and carved links.
///
/// Neighbors and links are stored as direction bit sets, so a cell is `Copy` and a
/// copy-on-write of the whole grid is a flat memcpy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    coord: Coord,
    /// Directions in which a lattice neighbor exists. Fixed at grid creation.
    neighbors: u8,
    /// Directions that have been carved. Always a subset of `neighbors`.
    links: u8,
    annotation: Option<usize>,
}

impl Cell {
    pub(crate) fn new(coord: Coord, neighbors: u8) -> Self {
        Cell {
            coord,
            neighbors,
            links: 0,
            annotation: None,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Structurally adjacent coordinates, in north, south, east, west order.
    pub fn neighbors(&self) -> impl Iterator<Item = Coord> + '_ {
        self.directions(self.neighbors)
    }

    /// Coordinates this cell has been carved open to, in north, south, east, west order.
    pub fn links(&self) -> impl Iterator<Item = Coord> + '_ {
        self.directions(self.links)
    }

    pub fn has_neighbor(&self, direction: Direction) -> bool {
        self.neighbors & direction.bit() != 0
    }

    pub fn is_linked_toward(&self, direction: Direction) -> bool {
        self.links & direction.bit() != 0
    }

    /// Whether this cell is linked to the cell at `other`.
    pub fn is_linked(&self, other: Coord) -> bool {
        Direction::between(self.coord, other).is_some_and(|d| self.is_linked_toward(d))
    }

    pub fn neighbor_count(&self) -> usize {
        self.neighbors.count_ones() as usize
    }

    pub fn link_count(&self) -> usize {
        self.links.count_ones() as usize
    }

    /// Value attached by analysis, such as a distance from a source cell.
    pub fn annotation(&self) -> Option<usize> {
        self.annotation
    }

    /// Carve toward `direction`. Returns `false` if the link already existed.
    pub(crate) fn add_link(&mut self, direction: Direction) -> bool {
        debug_assert!(self.has_neighbor(direction), "links must stay within neighbors");
        let before = self.links;
        self.links |= direction.bit();
        before != self.links
    }

    /// Returns `true` if the annotation changed.
    pub(crate) fn set_annotation(&mut self, value: usize) -> bool {
        let changed = self.annotation != Some(value);
        self.annotation = Some(value);
        changed
    }

    pub(crate) fn clear_annotation(&mut self) {
        self.annotation = None;
    }

    fn directions(&self, bits: u8) -> impl Iterator<Item = Coord> + '_ {
        let coord = self.coord;
        Direction::ALL
            .into_iter()
            .filter(move |d| bits & d.bit() != 0)
            .filter_map(move |d| d.step(coord))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_are_subset_of_neighbors() {
        let mut cell = Cell::new((1, 1), Direction::North.bit() | Direction::East.bit());
        assert_eq!(cell.neighbors().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
        assert_eq!(cell.links().count(), 0);

        assert!(cell.add_link(Direction::East));
        // Linking the same direction twice changes nothing
        assert!(!cell.add_link(Direction::East));
        assert_eq!(cell.links().collect::<Vec<_>>(), vec![(1, 2)]);
        assert!(cell.is_linked((1, 2)));
        assert!(!cell.is_linked((0, 1)));
        // Non-adjacent coordinates are never linked
        assert!(!cell.is_linked((3, 3)));
    }

    #[test]
    fn test_annotation_change_detection() {
        let mut cell = Cell::new((0, 0), 0);
        assert_eq!(cell.annotation(), None);
        assert!(cell.set_annotation(4));
        assert!(!cell.set_annotation(4));
        assert_eq!(cell.annotation(), Some(4));
    }
}
