use airnav_lib::{
    find_route_a_star, find_route_dijkstra, load_airspace, plan_route, reachable_from, AirSpace,
    AirSpaceFiles, Graph, Node, RouteAlgorithm, RouteRequest, SearchOptions,
};
use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use std::hint::black_box;
use std::path::PathBuf;

const GRID_SIDE: usize = 60;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

fn grid_key(x: usize, y: usize) -> String {
    format!("n{x}_{y}")
}

static AIRSPACE: Lazy<AirSpace> = Lazy::new(|| {
    load_airspace(&AirSpaceFiles::for_region(fixtures_dir(), "Cat")).expect("fixture loads")
});

static GRID: Lazy<Graph> = Lazy::new(|| {
    let mut graph = Graph::new("grid");
    for x in 0..GRID_SIDE {
        for y in 0..GRID_SIDE {
            graph
                .add_node(Node::planar(grid_key(x, y), x as f64, y as f64))
                .expect("unique grid key");
        }
    }
    for x in 0..GRID_SIDE {
        for y in 0..GRID_SIDE {
            let here = grid_key(x, y);
            if x + 1 < GRID_SIDE {
                let right = grid_key(x + 1, y);
                graph
                    .add_named_segment(format!("{here}-{right}"), &here, &right)
                    .expect("grid nodes exist");
            }
            if y + 1 < GRID_SIDE {
                let up = grid_key(x, y + 1);
                graph
                    .add_named_segment(format!("{here}-{up}"), &here, &up)
                    .expect("grid nodes exist");
            }
        }
    }
    graph
});

static DIJKSTRA_REQUEST: Lazy<RouteRequest> =
    Lazy::new(|| RouteRequest::new("GIR", "ZAR").with_algorithm(RouteAlgorithm::Dijkstra));
static ASTAR_REQUEST: Lazy<RouteRequest> =
    Lazy::new(|| RouteRequest::new("GIR", "ZAR").with_algorithm(RouteAlgorithm::AStar));

fn benchmark_pathfinding(c: &mut Criterion) {
    let airspace = &*AIRSPACE;
    let grid = &*GRID;
    let corner = grid_key(0, 0);
    let opposite = grid_key(GRID_SIDE - 1, GRID_SIDE - 1);

    c.bench_function("dijkstra_gir_zar", |b| {
        let request = &*DIJKSTRA_REQUEST;
        b.iter(|| {
            let plan = plan_route(airspace, request).expect("route exists");
            black_box(plan.hop_count())
        });
    });

    c.bench_function("astar_gir_zar", |b| {
        let request = &*ASTAR_REQUEST;
        b.iter(|| {
            let plan = plan_route(airspace, request).expect("route exists");
            black_box(plan.steps.len())
        });
    });

    c.bench_function("dijkstra_grid_corners", |b| {
        b.iter(|| {
            let route = find_route_dijkstra(grid, &corner, &opposite).expect("grid is connected");
            black_box(route.cost)
        });
    });

    c.bench_function("astar_grid_corners", |b| {
        let options = SearchOptions::default();
        b.iter(|| {
            let route =
                find_route_a_star(grid, &corner, &opposite, &options).expect("grid is connected");
            black_box(route.cost)
        });
    });

    c.bench_function("reachable_grid", |b| {
        b.iter(|| black_box(reachable_from(grid, &corner).len()));
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
