use herald::{Event, EventConfig, EventFlags, Listener, Phase, Variable, flush, priority};
use herald_macros::Emitter;
use std::cell::Cell;
use std::rc::Rc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Emitter)]
struct Player {
    name: String,
    on_jump: Event<()>,
    on_collect: Event<(Variable<i64>,)>,
    points: Cell<i64>,
}

impl Player {
    fn new(name: &str) -> anyhow::Result<Self> {
        // 事件配置也可以来自配置文件
        let config: EventConfig =
            serde_json::from_str(r#"{ "cancellable": true, "name": "player.collect" }"#)?;

        Ok(Self {
            name: name.to_string(),
            on_jump: Event::with_config(
                EventConfig::builder().name("player.jump".to_string()).build(),
            ),
            on_collect: Event::with_config(config),
            points: Cell::new(0),
        })
    }

    fn jump(&self) -> anyhow::Result<()> {
        self.on_jump.trigger(&())?;
        Ok(())
    }

    fn collect(&self, amount: i64) -> anyhow::Result<()> {
        let value = Variable::of(amount);
        let applied = self.on_collect.trigger_with(&(value.clone(),), || {
            let gained = value.get().unwrap_or_default();
            self.points.set(self.points.get() + gained);
        })?;
        println!(
            "{} collects {}: applied={}, points={}",
            self.name,
            amount,
            applied,
            self.points.get()
        );
        Ok(())
    }
}

#[derive(Emitter)]
struct World {
    on_any_jump: Event<(String,)>,
    on_open_door: Event<(u32,)>,
    double_points: Cell<bool>,
    no_points: Cell<bool>,
    locked: Cell<bool>,
}

impl World {
    fn new() -> Self {
        Self {
            on_any_jump: Event::new(),
            on_open_door: Event::create(EventFlags::CHRONICLED | EventFlags::CANCELLABLE),
            double_points: Cell::new(false),
            no_points: Cell::new(false),
            locked: Cell::new(false),
        }
    }

    fn open_door(&self, door: u32) -> anyhow::Result<()> {
        let opened = self
            .on_open_door
            .trigger_with(&(door,), || println!("door {door} swings open"))?;
        if !opened {
            println!("door {door} stays shut");
        }
        Ok(())
    }
}

// 世界规则：双倍积分与禁止得分
fn world_rules(world: &Rc<World>, player: &Player) -> Listener<(Variable<i64>,)> {
    let world = world.clone();
    let on_collect = player.on_collect.clone();
    Listener::new(move |(value,): &(Variable<i64>,)| {
        if world.double_points.get() {
            value.apply(|v| v * 2);
        }
        if world.no_points.get() {
            on_collect.cancel()?;
        }
        Ok(())
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("herald=debug".parse()?))
        .init();

    let world = Rc::new(World::new());
    let player = Player::new("alice")?;

    // 收集积分
    player
        .on_collect
        .bind(&world_rules(&world, &player), priority::HIGHEST, false)?;
    let announcer = Listener::infallible(|(value,): &(Variable<i64>,)| {
        println!("  announcer: +{}", value.get().unwrap_or_default());
    });
    player.on_collect.bind(&announcer, priority::HIGH, true)?;

    player.collect(100)?;
    world.double_points.set(true);
    player.collect(100)?;
    world.no_points.set(true);
    player.collect(1000)?;
    world.no_points.set(false);

    // 跳跃转发到全局事件
    let echo = Listener::infallible(|(who,): &(String,)| println!("  world sees {who} jump"));
    world.on_any_jump.bind_priority(&echo, priority::MONITOR)?;
    player
        .on_jump
        .redirect(&world.on_any_jump, player.name.clone())?;
    player.jump()?;

    // 编年事件：PRE 可以拦截，POST 只做观察
    let lock = {
        let world = world.clone();
        Listener::new(move |(door,): &(u32,)| {
            if world.locked.get() {
                info!(door, "door is locked");
                world.on_open_door.cancel()?;
            }
            Ok(())
        })
    };
    let after = Listener::infallible(|(door,): &(u32,)| println!("  door {door} was opened"));
    world
        .on_open_door
        .bind_phase(Phase::Pre, &lock, priority::NORMAL, false)?;
    world
        .on_open_door
        .bind_phase(Phase::Post, &after, priority::NORMAL, false)?;

    world.open_door(1)?;
    world.locked.set(true);
    world.open_door(2)?;

    // 生命周期结束，断开全部绑定
    let released = flush(&player) + flush(world.as_ref());
    info!(released, "event slots flushed");
    Ok(())
}
