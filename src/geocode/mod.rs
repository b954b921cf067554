mod client;
mod model;

pub use client::{GeocodeError, KakaoGeocoder, ReverseGeocoder};
