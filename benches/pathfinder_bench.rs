use criterion::{criterion_group, criterion_main, Criterion};
use fixed_grid_pathfinding::{
    Coord, CostModel, PathFinder, Route, SearchConfig, FRONTIER_CAPACITY, MAP_SIZE, PATH_LENGTH,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

type Grid = [[bool; MAP_SIZE]; MAP_SIZE];

fn random_scenarios(n: usize, density: f64, rng: &mut StdRng) -> Vec<(Grid, Coord, Coord)> {
    (0..n)
        .map(|_| {
            let mut grid = [[false; MAP_SIZE]; MAP_SIZE];
            for row in grid.iter_mut() {
                for cell in row.iter_mut() {
                    *cell = rng.gen_bool(density);
                }
            }
            let start = Coord::new(rng.gen_range(0..MAP_SIZE), rng.gen_range(0..MAP_SIZE));
            let goal = Coord::new(rng.gen_range(0..MAP_SIZE), rng.gen_range(0..MAP_SIZE));
            grid[start.row][start.col] = false;
            grid[goal.row][goal.col] = false;
            (grid, start, goal)
        })
        .collect()
}

fn random_grid_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    for density in [0.0, 0.2, 0.35] {
        let scenarios = random_scenarios(100, density, &mut rng);
        for (model_str, cost_model) in [
            ("astar", CostModel::AStar),
            ("heuristic chain", CostModel::HeuristicChain),
        ] {
            for component_check in [false, true] {
                let finder: PathFinder<MAP_SIZE, FRONTIER_CAPACITY> = PathFinder::new(
                    SearchConfig::default()
                        .with_cost_model(cost_model)
                        .with_component_check(component_check),
                );
                let check_str = if component_check { " (components)" } else { "" };
                let name =
                    format!("{MAP_SIZE}x{MAP_SIZE}, density {density}, {model_str}{check_str}");
                c.bench_function(name.as_str(), |b| {
                    let mut route: Route<PATH_LENGTH> = Route::new();
                    b.iter(|| {
                        for (grid, start, goal) in &scenarios {
                            let _ =
                                black_box(finder.find_path_into(grid, *start, *goal, &mut route));
                        }
                    })
                });
            }
        }
    }
}

criterion_group!(benches, random_grid_bench);
criterion_main!(benches);
