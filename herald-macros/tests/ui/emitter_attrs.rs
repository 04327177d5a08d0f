use herald::{Emitter, Event, Listener};
use herald_macros::Emitter;
use std::rc::Rc;

#[derive(Emitter)]
struct Door {
    on_open: Event<()>,
    #[event(skip)]
    on_inspect: Event<()>,
    #[event]
    shared: Rc<Event<(u8,)>>,
}

#[derive(Emitter)]
struct Pair(Event<()>, #[event(skip)] Event<()>, u32);

#[derive(Emitter)]
struct Empty;

fn main() {
    let door = Door {
        on_open: Event::new(),
        on_inspect: Event::new(),
        shared: Rc::new(Event::new()),
    };
    let inspector = Listener::infallible(|_: &()| {});
    door.on_inspect.bind(&inspector, 0, false).unwrap();
    door.shared
        .bind(&Listener::infallible(|_| {}), 0, false)
        .unwrap();

    assert_eq!(door.events().len(), 2);
    herald::flush(&door);
    assert!(door.on_inspect.bound(&inspector));
    assert!(door.shared.is_empty());

    let pair = Pair(Event::new(), Event::new(), 0);
    assert_eq!(pair.events().len(), 1);
    let _ = pair.2;

    assert!(Empty.events().is_empty());
}
