use crate::{
    error::Result,
    generators::{RandomSource, choose},
    maze::{Direction, Grid},
    report::Reporter,
};

/// Links every cell either north or east, visiting cells in row-major order.
pub fn binary_tree(mut grid: Grid, reporter: &Reporter, rng: &mut dyn RandomSource) -> Result<Grid> {
    for coord in grid.coords() {
        let candidates = [Direction::North, Direction::East]
            .into_iter()
            .filter_map(|d| grid.neighbor(coord, d))
            .collect::<Vec<_>>();

        // The north-east corner has neither neighbor
        if let Some(neighbor) = choose(rng, &candidates) {
            grid.link(coord, neighbor)?;
            reporter.update(&grid)?;
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::testing::{FixedChoice, carve_steps};

    #[test]
    fn test_prefer_east() {
        let (steps, grid) = carve_steps(binary_tree, 2, 2, FixedChoice(usize::MAX));
        assert_eq!(
            steps,
            vec![
                vec![(0, 0), (0, 1)],
                vec![(1, 0), (1, 1)],
                vec![(0, 1), (1, 1)],
            ]
        );
        assert_eq!(grid.link_count(), 3);
    }

    #[test]
    fn test_prefer_north() {
        let (steps, grid) = carve_steps(binary_tree, 3, 3, FixedChoice(0));
        assert_eq!(steps.len(), 8);
        // The top row is a single corridor
        assert!(grid.is_linked((0, 0), (0, 1)));
        assert!(grid.is_linked((0, 1), (0, 2)));
        // Every other cell opens north
        for row in 1..3 {
            for column in 0..3 {
                assert!(grid.is_linked((row, column), (row - 1, column)));
                assert_eq!(grid[(row, column)].links().count(), if row == 2 { 1 } else { 2 });
            }
        }
    }
}
