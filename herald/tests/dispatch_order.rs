use herald::{Event, EventFlags, Listener, Phase, priority};
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<&'static str>>>;

fn recorder<A: 'static>(log: &Log, name: &'static str) -> Listener<A> {
    let log = log.clone();
    Listener::infallible(move |_| log.borrow_mut().push(name))
}

#[test]
fn lower_priority_runs_first_regardless_of_bind_order() {
    let event: Event<(i32,)> = Event::new();
    let log = Log::default();

    event
        .bind(&recorder(&log, "debug"), priority::DEBUG, false)
        .unwrap();
    event
        .bind(&recorder(&log, "normal"), priority::NORMAL, false)
        .unwrap();
    event
        .bind(&recorder(&log, "monitor"), priority::MONITOR, false)
        .unwrap();
    event
        .bind(&recorder(&log, "override"), priority::OVERRIDE, false)
        .unwrap();
    event
        .bind(&recorder(&log, "impl"), priority::IMPL, false)
        .unwrap();

    for _ in 0..3 {
        log.borrow_mut().clear();
        event.trigger(&(1,)).unwrap();
        assert_eq!(
            *log.borrow(),
            vec!["monitor", "impl", "normal", "override", "debug"]
        );
    }
}

#[test]
fn equal_priority_fires_in_bind_order() {
    let event: Event<()> = Event::new();
    let log = Log::default();
    let names = ["a", "b", "c", "d", "e", "f", "g", "h"];

    for name in names {
        event
            .bind(&recorder(&log, name), priority::NORMAL, false)
            .unwrap();
    }
    event.trigger(&()).unwrap();

    assert_eq!(*log.borrow(), names.to_vec());
}

#[test]
fn rebinding_overwrites_priority() {
    let event: Event<()> = Event::new();
    let log = Log::default();
    let first = recorder(&log, "first");
    let second = recorder(&log, "second");

    event.bind(&first, 0, false).unwrap();
    event.bind(&second, 5, false).unwrap();
    event.bind(&first, 10, false).unwrap();

    assert_eq!(event.len(), 2);
    event.trigger(&()).unwrap();
    assert_eq!(*log.borrow(), vec!["second", "first"]);
}

#[test]
fn unbind_requires_the_bound_handle() {
    let event: Event<()> = Event::new();
    let log = Log::default();
    let handle = recorder(&log, "kept");

    // 同一函数另行构造的句柄身份不同，无法用来解绑
    let lookalike = recorder::<()>(&log, "kept");
    event.bind(&handle, 0, false).unwrap();
    event.unbind(&lookalike);
    assert!(event.bound(&handle));

    event.unbind(&handle.clone());
    assert!(!event.bound(&handle));
    event.trigger(&()).unwrap();
    assert!(log.borrow().is_empty());
}

#[test]
fn chronicled_phases_keep_separate_order() {
    let event: Event<()> = Event::create(EventFlags::CHRONICLED);
    let log = Log::default();

    event
        .bind_phase(Phase::Post, &recorder(&log, "post-late"), 9, false)
        .unwrap();
    event
        .bind_phase(Phase::Pre, &recorder(&log, "pre-late"), 9, false)
        .unwrap();
    event
        .bind_phase(Phase::Post, &recorder(&log, "post-early"), -9, false)
        .unwrap();
    event
        .bind_phase(Phase::Pre, &recorder(&log, "pre-early"), -9, false)
        .unwrap();

    event.trigger(&()).unwrap();
    assert_eq!(
        *log.borrow(),
        vec!["pre-early", "pre-late", "post-early", "post-late"]
    );
}

#[test]
fn listener_unbound_mid_walk_still_runs_in_that_walk() {
    let event: Event<()> = Event::new();
    let log = Log::default();
    let victim = recorder(&log, "victim");
    let remover = {
        let event = event.clone();
        let victim = victim.clone();
        Listener::infallible(move |_: &()| event.unbind(&victim))
    };

    event.bind(&remover, 0, false).unwrap();
    event.bind(&victim, 1, false).unwrap();

    event.trigger(&()).unwrap();
    event.trigger(&()).unwrap();
    assert_eq!(*log.borrow(), vec!["victim"]);
    event.unbind_all();
}

#[test]
fn shorthand_binds_use_default_options() {
    let event: Event<()> = Event::create(EventFlags::CANCELLABLE);
    let log = Log::default();
    let canceller = {
        let event = event.clone();
        let log = log.clone();
        Listener::new(move |_: &()| {
            log.borrow_mut().push("cancel");
            event.cancel()?;
            Ok(())
        })
    };

    event
        .bind_priority(&recorder(&log, "late"), priority::LOW)
        .unwrap();
    event.bind_default(&canceller).unwrap();
    event
        .bind_priority(&recorder(&log, "early"), priority::MONITOR)
        .unwrap();

    // 简写绑定不忽略已取消事件，取消之后仍然执行
    event.trigger(&()).unwrap();
    assert_eq!(*log.borrow(), vec!["early", "cancel", "late"]);
    event.unbind_all();
}

#[test]
fn shorthand_bind_rejects_chronicled_event() {
    let event: Event<()> = Event::create(EventFlags::CHRONICLED);
    let listener = Listener::infallible(|_: &()| {});

    assert!(event.bind_default(&listener).is_err());
    assert!(event.bind_priority(&listener, priority::HIGH).is_err());
    assert!(event.is_empty());
}
