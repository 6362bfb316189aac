use std::collections::HashMap;

use crate::{
    error::{MazeError, Result},
    maze::{Coord, Grid},
    report::{ReportStream, Reporter, run_sync},
};

/// Shortest link-path length from a root cell to every cell of a maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distances {
    root: Coord,
    cells: HashMap<Coord, usize>,
    /// Farthest cell and its distance. Ties go to the cell discovered first.
    max: (Coord, usize),
    /// The analysed maze with every cell annotated with its distance.
    grid: Grid,
}

impl Distances {
    pub fn root(&self) -> Coord {
        self.root
    }

    pub fn get(&self, coord: Coord) -> Option<usize> {
        self.cells.get(&coord).copied()
    }

    pub fn max(&self) -> (Coord, usize) {
        self.max
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, usize)> + '_ {
        self.cells.iter().map(|(&coord, &d)| (coord, d))
    }
}

/// Breadth-first search over links from `source`.
///
/// Publishes one snapshot per shell of equidistant cells, with exactly that shell
/// changed and annotated with its distance. Fails with [`MazeError::UnreachableCell`]
/// if some cell cannot be reached through links.
pub fn find_distances(grid: Grid, source: Coord, reporter: &Reporter) -> Result<Distances> {
    grid.lookup(source)?;
    tracing::debug!(
        "[distances] searching {}x{} grid from {:?}",
        grid.rows(),
        grid.columns(),
        source
    );
    let mut grid = grid.without_annotations();

    let mut cells = HashMap::from([(source, 0)]);
    let mut shell = vec![source];
    let mut distance = 0;
    let mut max = (source, 0);
    while let Some(&first) = shell.first() {
        grid.annotate(shell.iter().map(|&c| (c, distance)))?;
        reporter.update(&grid)?;
        max = (first, distance);

        let mut next_shell = Vec::new();
        for &cell in &shell {
            for next in grid.links(cell) {
                if !cells.contains_key(&next) {
                    cells.insert(next, distance + 1);
                    next_shell.push(next);
                }
            }
        }
        tracing::trace!("[distances] shell {} has {} cells", distance, shell.len());
        shell = next_shell;
        distance += 1;
    }

    if let Some(unreached) = grid.coords().find(|c| !cells.contains_key(c)) {
        return Err(MazeError::UnreachableCell(unreached));
    }
    tracing::debug!(
        "[distances] from {:?}: farthest cell {:?} at {}",
        source,
        max.0,
        max.1
    );
    Ok(Distances {
        root: source,
        cells,
        max,
        grid,
    })
}

/// Distances from `source` without observing the shells.
pub fn distances(grid: &Grid, source: Coord) -> Result<Distances> {
    run_sync(grid.clone(), |grid, reporter| {
        find_distances(grid, source, reporter)
    })
}

/// Distances from `source` on a producer thread, streaming one snapshot per shell.
///
/// An out-of-bounds `source` fails here, before any snapshot is produced.
pub fn spawn_distances(
    grid: Grid,
    source: Coord,
    capacity: usize,
) -> Result<ReportStream<Distances>> {
    grid.lookup(source)?;
    Ok(ReportStream::spawn(grid, capacity, move |grid, reporter| {
        find_distances(grid, source, reporter)
    }))
}

/// Distance of the shell a [`find_distances`] snapshot announces.
///
/// Every changed cell of a shell snapshot carries the same distance, and shells are
/// published in increasing order, so this is also the running maximum distance at
/// that point of the search. `None` for a snapshot with no annotated changed cell.
pub fn shell_distance(snapshot: &Grid) -> Option<usize> {
    snapshot
        .changed_cells()
        .iter()
        .find_map(|&coord| snapshot[coord].annotation())
}
