//! Agents picking the nearest of several beacons on a periodic 3D terrain.
//!
//! Run: RUST_LOG=info cargo run --bin terrain

use lattice_core::{Coord, Lattice, LatticeArray};
use lattice_demos::{Walkers, run_until_settled};
use lattice_paths::{CostMetric, Pathfinder, PathfinderConfig, Selection, Topology};
use rand::SeedableRng;
use rand::rngs::StdRng;

const EXTENTS: [i32; 3] = [12, 12, 6];
const AGENTS: usize = 4;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(7);
    let lattice = Lattice::new(EXTENTS)?;

    // Rolling hills along x and y, flat along z.
    let heights = LatticeArray::from_fn(lattice, |c: Coord<3>| {
        let x = c[0] as f64 / EXTENTS[0] as f64 * std::f64::consts::TAU;
        let y = c[1] as f64 / EXTENTS[1] as f64 * std::f64::consts::TAU;
        (20.0 * (x.sin() + y.cos())).round() as i32
    });

    let mut pf = Pathfinder::new(
        EXTENTS,
        true,
        PathfinderConfig {
            topology: Topology::Moore,
            walkable: None,
            cost_metric: Some(CostMetric::height(heights)),
        },
    )?;

    let beacons = [
        Coord::new([1, 1, 1]),
        Coord::new([6, 6, 3]),
        Coord::new([12, 3, 6]),
    ];

    let mut walkers = Walkers::new();
    for id in 0..AGENTS {
        let start = pf
            .random_walkable(&mut rng)
            .ok_or("no walkable cell to spawn on")?;
        walkers.spawn(id, start);
        let nearest = pf.set_best_target(&walkers, id, &beacons, Selection::Shortest)?;
        let steps = pf.path(id).map_or(0, |p| p.len());
        match nearest {
            Some(b) => println!("agent {id} at {start}: heading to beacon {b} in {steps} steps"),
            None => println!("agent {id} at {start}: no beacon reachable"),
        }
    }

    let ticks = run_until_settled(&mut pf, &mut walkers, 1000);
    println!("all agents arrived after {ticks} ticks");
    for (id, pos) in walkers.iter() {
        println!("agent {id} at {pos}");
    }
    Ok(())
}
