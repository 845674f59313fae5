//! Config parsing and resolution into [`ScannerOptions`](infraguard_engine::ScannerOptions).
//!
//! IO-free: configuration arrives as a string.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{CONFIG_SCHEMA_ID, InfraguardConfigV1};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `infraguard.toml` into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<InfraguardConfigV1> {
    let cfg: InfraguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Merge file config and caller overrides into scanner options.
pub fn resolve_config(
    cfg: InfraguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}

/// JSON schema of the config file.
pub fn config_schema() -> schemars::Schema {
    schemars::schema_for!(InfraguardConfigV1)
}
