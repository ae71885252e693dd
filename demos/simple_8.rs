use fixed_grid_pathfinding::{Coord, NodeGrid, PathFinder, Route};

// In this example a route is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Cells have an 8-neighbourhood

fn main() {
    let occupancy = [[0u8, 0, 0], [0, 1, 0], [0, 0, 0]];
    let finder: PathFinder<3, 9> = PathFinder::default();
    println!("{}", NodeGrid::<3>::build(&occupancy).unwrap());
    let start = Coord::new(0, 0);
    let end = Coord::new(2, 2);
    let route: Route<8> = finder.find_path(&occupancy, start, end).unwrap();
    println!("Route: {} (cost {})", route, route.cost());
    println!("Codes: {:?}", route.codes().collect::<Vec<_>>());
    for p in route.points(start) {
        println!("{:?}", p);
    }
}
