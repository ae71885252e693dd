use fixed_grid_pathfinding::{Coord, PathError, PathFinder, Route, SearchConfig};

// Two obstacles touching at a corner:
//  __
// |S#|
// |#E|
//  __
// With corner cutting the diagonal squeezes through; without it the goal is unreachable.

fn main() {
    let occupancy = [[false, true], [true, false]];
    let start = Coord::new(0, 0);
    let end = Coord::new(1, 1);
    for allow in [true, false] {
        let finder: PathFinder<2, 4> =
            PathFinder::new(SearchConfig::default().with_corner_cutting(allow));
        let result: Result<Route<4>, PathError> = finder.find_path(&occupancy, start, end);
        match result {
            Ok(route) => println!("corner cutting {allow}: {route}"),
            Err(e) => println!("corner cutting {allow}: {e}"),
        }
    }
}
