use grid_search::{run_all, PathingGrid, Step, DEFAULT_WALL_DENSITY};
use rand::{rngs::StdRng, SeedableRng};

// Runs all four algorithms on the default 20x40 grid with a seeded random maze and prints,
// for each one, the explored cells (o), the path (*) and some statistics.
//
// Usage: cargo run --example visualize [seed]

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pathing_grid = PathingGrid::default();
    pathing_grid
        .generate_maze(&mut rng, DEFAULT_WALL_DENSITY)
        .unwrap();
    println!("{}", pathing_grid);
    for result in run_all(&pathing_grid) {
        println!("{}:", result.algorithm);
        println!("{}", pathing_grid.render(&result));
        let path_steps = result
            .steps()
            .filter(|step| matches!(step, Step::Path(_)))
            .count();
        println!(
            "Nodes visited: {}; path length: {}; playback frames: {} + {}\n",
            result.visited_count(),
            result.path_length(),
            result.visited_count(),
            path_steps
        );
    }
}
