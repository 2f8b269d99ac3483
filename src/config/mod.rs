mod env;
mod settings;

pub use env::{EnvSource, ProcessEnv};
pub use settings::{normalize_base_url, CourierConfig, OtelConfig, Settings, DEFAULT_COURIER_URL};
