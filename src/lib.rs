use std::sync::Arc;

use config::Config;
use geocode::ReverseGeocoder;
use usage::UsageGuard;

pub mod config;
pub mod error;
pub mod geocode;
pub mod middleware;
pub mod router;
pub mod usage;

pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub usage: Arc<UsageGuard>,
    pub geocoder: Arc<dyn ReverseGeocoder>,
}
