// labelcheck-core/src/infrastructure/config/mod.rs

pub mod loader;

pub use loader::{
    CONFIG_FILE_NAMES, ENV_CONCURRENCY, ENV_SKIP_QUALITY, load_config, load_config_file,
};
