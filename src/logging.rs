use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Фильтр по умолчанию: info для генератора
pub const DEFAULT_FILTER: &str = "info";

/// Устанавливает подписчика `tracing` с выводом в консоль.
///
/// Переменная `RUST_LOG` имеет приоритет над `filter`.
/// Возвращает `false`, если подписчик уже был установлен.
pub fn init_logging(filter: &str) -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
        .is_ok()
}
