use proc_macro::TokenStream;

mod emitter;

/// 事件槽容器宏
/// - 为结构体实现 `::herald::flush::Emitter`，供 `herald::flush` 批量解绑
/// - 自动收集类型为 `Event<..>` 的字段（按最后一段路径名匹配，`herald::Event<..>` 亦可）
/// - `#[event]`：收集类型不是 `Event<..>` 但实现了 `Unbind` 的字段（如 `Rc<Event<..>>`）
/// - `#[event(skip)]`：跳过该字段
///
/// ```ignore
/// #[derive(Emitter)]
/// struct Player {
///     on_jump: Event<()>,
///     on_collect: Event<(Variable<i64>,)>,
///     #[event(skip)]
///     on_debug: Event<()>,
///     #[event]
///     shared: Rc<Event<()>>,
///     points: i64,
/// }
/// ```
#[proc_macro_derive(Emitter, attributes(event))]
pub fn emitter(input: TokenStream) -> TokenStream {
    emitter::expand(input)
}
