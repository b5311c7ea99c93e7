use shared_types::ViewerConfig;
use std::path::Path;

/// Environment variables with this prefix override file settings,
/// e.g. `TELEMETRY_ENDPOINT` or `TELEMETRY_POLL_INTERVAL_MS`
pub const ENV_PREFIX: &str = "TELEMETRY";

/// Layer an optional config file and the environment over the defaults
pub fn load_config(path: Option<&Path>) -> anyhow::Result<ViewerConfig> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .build()?;

    Ok(settings.try_deserialize()?)
}
