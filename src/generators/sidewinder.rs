use crate::{
    error::Result,
    generators::{RandomSource, choose},
    maze::{Direction, Grid},
    report::Reporter,
};

/// Carves each row as runs of east-linked cells, closing each run by linking one of
/// its members north.
pub fn sidewinder(mut grid: Grid, reporter: &Reporter, rng: &mut dyn RandomSource) -> Result<Grid> {
    for row in 0..grid.rows() {
        let mut run = Vec::new();
        for column in 0..grid.columns() {
            let coord = (row, column);
            run.push(coord);

            let north = grid.neighbor(coord, Direction::North);
            let east = grid.neighbor(coord, Direction::East);
            let close_run = match (north, east) {
                (_, None) => true,
                (None, Some(_)) => false,
                (Some(_), Some(_)) => rng.coin(),
            };

            if close_run {
                // The top row closes its only run without a northern exit
                let member = north
                    .and_then(|_| choose(rng, &run))
                    .and_then(|m| grid.neighbor(m, Direction::North).map(|above| (m, above)));
                if let Some((member, above)) = member {
                    grid.link(member, above)?;
                    reporter.update(&grid)?;
                }
                run.clear();
            } else if let Some(east) = east {
                grid.link(coord, east)?;
                reporter.update(&grid)?;
            }
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::testing::{FixedChoice, ScriptedChoice, carve_steps};

    #[test]
    fn test_always_close() {
        // Index 0 flips heads, which closes every run immediately
        let (_, grid) = carve_steps(sidewinder, 3, 4, FixedChoice(0));
        for row in 1..3 {
            for column in 0..4 {
                assert!(grid.is_linked((row, column), (row - 1, column)));
                assert!(!grid.is_linked((row, column), (row, column + 1)));
            }
        }
        assert_eq!(grid.link_count(), 11);
    }

    #[test]
    fn test_never_close() {
        // Tails on every flip, and the last run member is chosen to go north
        let (_, grid) = carve_steps(sidewinder, 3, 4, FixedChoice(1));
        for row in 0..3 {
            for column in 0..3 {
                assert!(grid.is_linked((row, column), (row, column + 1)));
            }
        }
        assert!(grid.is_linked((1, 1), (0, 1)));
        assert!(grid.is_linked((2, 1), (1, 1)));
        assert_eq!(grid.link_count(), 11);
    }

    #[test]
    fn test_run_closes_through_chosen_member() {
        // Second row of a 2x3 grid: tails, tails, then the forced close picks member 0
        let script = vec![1, 1, 0];
        let (steps, _) = carve_steps(sidewinder, 2, 3, ScriptedChoice(script));
        assert_eq!(
            steps,
            vec![
                vec![(0, 0), (0, 1)],
                vec![(0, 1), (0, 2)],
                vec![(1, 0), (1, 1)],
                vec![(1, 1), (1, 2)],
                vec![(0, 0), (1, 0)],
            ]
        );
    }
}
