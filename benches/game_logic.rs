use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tui_2048::core::{
    can_move, spawn, transform, GameSession, Grid, MemoryStore, SessionConfig,
};
use tui_2048::term::{GameView, HudView, Viewport};
use tui_2048::types::{Direction, GameAction};

fn busy_grid() -> Grid {
    Grid::from_values([
        [2, 2, 4, 8],
        [0, 4, 4, 16],
        [32, 0, 32, 2],
        [2, 4, 0, 4],
    ])
}

fn bench_transform(c: &mut Criterion) {
    let grid = busy_grid();
    for dir in Direction::ALL {
        c.bench_function(&format!("transform_{}", dir.as_str()), |b| {
            b.iter(|| transform(black_box(&grid), dir))
        });
    }
}

fn bench_can_move(c: &mut Criterion) {
    let stuck = Grid::from_values([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
    c.bench_function("can_move_stuck", |b| b.iter(|| can_move(black_box(&stuck))));
}

fn bench_spawn(c: &mut Criterion) {
    let grid = busy_grid();
    let mut rng = StdRng::seed_from_u64(12345);
    c.bench_function("spawn", |b| b.iter(|| spawn(black_box(grid.clone()), &mut rng)));
}

fn bench_turn(c: &mut Criterion) {
    let config = SessionConfig::default().with_seed(12345);
    let mut game = GameSession::new(&config, MemoryStore::new());
    let mut dirs = Direction::ALL.iter().cycle();

    c.bench_function("session_turn", |b| {
        b.iter(|| {
            let dir = *dirs.next().unwrap_or(&Direction::Left);
            if game.apply_action(GameAction::Move(dir)).event.is_some() {
                game.apply_action(GameAction::Restart);
            }
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let game = GameSession::new(&SessionConfig::default().with_seed(1), MemoryStore::new());
    let view = GameView::default();
    let snap = game.snapshot();
    let hud = HudView::new(game.win_target());
    let mut fb = view.render(&snap, &hud, Viewport::new(80, 24));

    c.bench_function("render_80x24", |b| {
        b.iter(|| view.render_into(black_box(&snap), &hud, Viewport::new(80, 24), &mut fb))
    });
}

criterion_group!(
    benches,
    bench_transform,
    bench_can_move,
    bench_spawn,
    bench_turn,
    bench_render
);
criterion_main!(benches);
