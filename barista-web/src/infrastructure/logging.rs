use anyhow::{Context, Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, fmt::format::FmtSpan};

/// Устанавливает глобальный subscriber. `RUST_LOG` важнее `default_level`;
/// некорректный `default_level` - ошибка старта.
pub(crate) fn init_logging(default_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .with_context(|| format!("invalid log level {default_level:?}"))?,
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}
