pub mod handler;
pub mod model;

pub use handler::{coordinate_to_address, get_client_config, get_usage, static_map};
