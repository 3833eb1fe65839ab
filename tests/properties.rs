use cellular_automata::application::{AutomatonConfig, AutomatonKind, ExecutionMode, InitialState};
use cellular_automata::domain::{CellState, Dimensions, Grid, Neighborhood, Pattern, presets, wrap};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn empty_life(size: usize) -> cellular_automata::Engine {
    AutomatonConfig::for_kind(AutomatonKind::Conway, size)
        .with_initial_state(InitialState::Uniform(CellState::ZERO))
        .build()
        .unwrap()
}

fn live_cells(engine: &cellular_automata::Engine) -> Vec<[isize; 3]> {
    engine
        .grid()
        .iter_cells()
        .filter(|(_, cell)| cell.is_alive())
        .map(|(coord, _)| coord)
        .collect()
}

#[test]
fn wraparound_holds_on_every_axis() {
    let mut rng = StdRng::seed_from_u64(11);
    for dims in [Dimensions::One(7), Dimensions::Two(5, 9), Dimensions::Three(3, 4, 6)] {
        let mut grid = Grid::new(dims).unwrap();
        grid.randomize(6, &mut rng);
        let extents = dims.extents();
        for axis in 0..dims.rank() {
            let extent = extents[axis] as isize;
            let mut below = [0isize; 3];
            let mut last = [0isize; 3];
            let mut beyond = [0isize; 3];
            below[axis] = -1;
            last[axis] = extent - 1;
            beyond[axis] = extent;
            assert_eq!(grid.get(below), grid.get(last), "axis {axis} of {dims:?}");
            assert_eq!(grid.get(beyond), grid.get([0, 0, 0]), "axis {axis} of {dims:?}");
        }
    }
    assert_eq!(wrap(-1, 5), 4);
    assert_eq!(wrap(5, 5), 0);
    assert_eq!(wrap(-11, 5), 4);
}

#[test]
fn cca_step_is_deterministic() {
    let build = || {
        AutomatonConfig::for_kind(AutomatonKind::Cca2D, 48)
            .with_seed(99)
            .with_execution(ExecutionMode::Serial)
            .build()
            .unwrap()
    };
    let mut a = build();
    let mut b = build();
    assert_eq!(a.grid(), b.grid());
    for _ in 0..15 {
        assert_eq!(a.step(), b.step());
        assert_eq!(a.grid(), b.grid());
    }
}

#[test]
fn uniform_grid_is_a_cca_fixed_point() {
    for (kind, size) in [(AutomatonKind::Cca1D, 20), (AutomatonKind::Cca2D, 12), (AutomatonKind::Cca3D, 5)] {
        let mut engine = AutomatonConfig::for_kind(kind, size)
            .with_initial_state(InitialState::Uniform(CellState(3)))
            .build()
            .unwrap();
        let before = engine.grid().clone();
        for _ in 0..4 {
            let report = engine.step();
            assert!(!report.changed(), "{kind:?} changed a uniform grid");
        }
        assert_eq!(engine.grid(), &before);
    }
}

#[test]
fn block_is_a_still_life() {
    let mut engine = empty_life(10);
    engine
        .place_pattern(&presets::block(), 4, 4, CellState::ALIVE)
        .unwrap();
    let before = engine.grid().clone();
    let report = engine.step();
    assert_eq!(engine.grid(), &before);
    assert_eq!(report.changed_cells, 0);
}

#[test]
fn blinker_has_period_two() {
    let mut engine = empty_life(9);
    engine
        .place_pattern(&presets::blinker(), 3, 4, CellState::ALIVE)
        .unwrap();
    let start = live_cells(&engine);
    assert_eq!(start, vec![[3, 4, 0], [4, 4, 0], [5, 4, 0]]);

    engine.step();
    let mut vertical = live_cells(&engine);
    vertical.sort();
    assert_eq!(vertical, vec![[4, 3, 0], [4, 4, 0], [4, 5, 0]]);

    engine.step();
    assert_eq!(live_cells(&engine), start);
}

#[test]
fn blinker_across_the_seam_keeps_oscillating() {
    let mut engine = empty_life(6);
    engine
        .place_pattern(&presets::blinker(), 5, 0, CellState::ALIVE)
        .unwrap();
    let start = engine.grid().clone();
    engine.step();
    assert_ne!(engine.grid(), &start);
    engine.step();
    assert_eq!(engine.grid(), &start);
}

#[test]
fn langton_mutates_one_cell_and_moves_one_step() {
    let mut engine = AutomatonConfig::for_kind(AutomatonKind::Langton, 16)
        .build()
        .unwrap();
    let (width, height) = engine.grid().width_height();

    for _ in 0..500 {
        let before = engine.grid().clone();
        let agent = *engine.agent().unwrap();
        let was_white = !before.get(agent.position).is_alive();

        engine.step();

        let diff: Vec<_> = before
            .cells()
            .iter()
            .zip(engine.grid().cells())
            .filter(|(a, b)| a != b)
            .collect();
        assert_eq!(diff.len(), 1);
        assert_eq!(engine.grid().get(agent.position), before.get(agent.position).toggle());

        let moved = engine.agent().unwrap();
        let expected_heading = if was_white {
            agent.heading.turn_clockwise()
        } else {
            agent.heading.turn_counter_clockwise()
        };
        assert_eq!(moved.heading, expected_heading);

        let (dx, dy) = expected_heading.vector();
        let expected = [
            wrap(agent.position[0] + dx, width) as isize,
            wrap(agent.position[1] + dy, height) as isize,
            0,
        ];
        assert_eq!(moved.position, expected);
    }
}

#[test]
fn moore_neighborhood_has_eight_cells_even_at_corners() {
    let mut grid = Grid::new(Dimensions::Two(4, 3)).unwrap();
    grid.fill_with(|[x, y, _]| CellState((x + y * 4) as u8));
    let neighborhood = Neighborhood::moore(2);
    for coord in [[0, 0, 0], [3, 0, 0], [0, 2, 0], [3, 2, 0], [1, 1, 0]] {
        let neighbors: Vec<_> = neighborhood.neighbors(&grid, coord).collect();
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&grid.get(coord)));
    }
    assert_eq!(Neighborhood::moore(1).len(), 2);
    assert_eq!(Neighborhood::moore(3).len(), 26);
}

#[test]
fn parallel_pass_matches_serial_pass() {
    for kind in [AutomatonKind::Cca2D, AutomatonKind::QuadLife, AutomatonKind::Cca3D, AutomatonKind::Rule30] {
        let build = |execution| {
            AutomatonConfig::for_kind(kind, 24)
                .with_seed(7)
                .with_execution(execution)
                .build()
                .unwrap()
        };
        let mut serial = build(ExecutionMode::Serial);
        let mut parallel = build(ExecutionMode::Parallel);
        for _ in 0..8 {
            assert_eq!(serial.step(), parallel.step());
        }
        assert_eq!(serial.grid(), parallel.grid(), "{kind:?}");
    }
}

#[test]
fn oversized_pattern_is_rejected() {
    let mut grid = Grid::new(Dimensions::Two(10, 10)).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let gun: Pattern = presets::glider_gun();
    assert!(gun.place_randomly(&mut grid, CellState::ALIVE, &mut Vec::new(), &mut rng).is_err());
    assert_eq!(grid.count_alive(), 0);
}
