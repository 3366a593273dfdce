pub mod overrides;
pub mod run_config;

pub use overrides::GridOverrides;
pub use run_config::RunConfig;
