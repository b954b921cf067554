mod client_ip;
mod error_handler;

pub use client_ip::ClientIp;
pub use error_handler::log_errors;
