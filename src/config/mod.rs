mod settings;

pub use settings::{HttpConfig, LoggingConfig, Settings, API_ENDPOINT_ENV, API_KEY_ENV};
