//! Walkers crossing a 2D grid with random obstacles.
//!
//! Run: RUST_LOG=debug cargo run --bin walkers

use lattice_core::{Coord, Lattice};
use lattice_demos::{Walkers, render, run_until_settled, scatter_obstacles};
use lattice_paths::{Pathfinder, PathfinderConfig, Space, Topology};
use rand::SeedableRng;
use rand::rngs::StdRng;

const WIDTH: i32 = 40;
const HEIGHT: i32 = 16;
const WALKERS: usize = 6;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(42);
    let lattice = Lattice::new([WIDTH, HEIGHT])?;
    let walkable = scatter_obstacles(&mut rng, lattice, 0.25, &[]);

    let mut pf = Pathfinder::new(
        [WIDTH, HEIGHT],
        false,
        PathfinderConfig {
            topology: Topology::Moore,
            walkable: Some(walkable),
            cost_metric: None,
        },
    )?;

    let mut walkers = Walkers::new();
    for id in 0..WALKERS {
        let Some(start) = pf.random_walkable(&mut rng) else {
            return Err("no walkable cell to spawn on".into());
        };
        walkers.spawn(id, start);
        let target = pf
            .random_walkable(&mut rng)
            .unwrap_or(Coord::new([WIDTH, HEIGHT]));
        pf.set_target(&walkers, id, target)?;
        match pf.path(id) {
            Some(p) if !p.is_empty() => println!(
                "walker {id}: {start} -> {target}, {} steps, cost {}",
                p.len(),
                pf.path_cost(start, p)
            ),
            _ => println!("walker {id}: {start} -> {target} unreachable"),
        }
    }

    println!("\n{}", render(&pf, &walkers));
    let ticks = run_until_settled(&mut pf, &mut walkers, (WIDTH * HEIGHT) as usize);
    println!("settled after {ticks} ticks\n");
    println!("{}", render(&pf, &walkers));

    for (id, pos) in walkers.iter() {
        println!("walker {id} at {pos}");
        debug_assert_eq!(walkers.position(id), Some(pos));
        pf.remove_agent(id);
    }
    Ok(())
}
