use std::{env, path::PathBuf, sync::Once};

static TRACING_INIT: Once = Once::new();

const HOME_ENV: &str = "CASHFLOW_CORE_HOME";
const DEFAULT_DIR_NAME: &str = "cashflow_core";

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "cashflow_core=info".parse() {
            filter = filter.add_directive(directive);
        }

        // A subscriber installed by the host application wins.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}

/// Returns the application-specific base directory.
///
/// Honors `CASHFLOW_CORE_HOME`, then the platform configuration directory,
/// then the current directory.
pub fn app_base_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
