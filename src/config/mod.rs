mod types;

pub use types::load_config;
pub use types::load_config_from;
pub use types::Config;
pub use types::DEFAULT_ENDPOINTS;
