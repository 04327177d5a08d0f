use herald::{Event, EventFlags, Listener, Variable, flush};
use herald_macros::Emitter;

#[derive(Emitter)]
struct Player {
    on_jump: Event<()>,
    on_collect: herald::Event<(Variable<i64>,)>,
    points: i64,
}

fn main() {
    let player = Player {
        on_jump: Event::new(),
        on_collect: Event::create(EventFlags::CANCELLABLE),
        points: 0,
    };
    player
        .on_jump
        .bind(&Listener::infallible(|_| {}), 0, false)
        .unwrap();
    player
        .on_collect
        .bind(&Listener::infallible(|_| {}), 0, false)
        .unwrap();

    // 只收集两个事件字段
    assert_eq!(flush(&player), 2);
    assert!(player.on_jump.is_empty());
    assert!(player.on_collect.is_empty());
    let _ = player.points;
}
