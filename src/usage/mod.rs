mod guard;
mod model;
mod store;

pub use guard::UsageGuard;
pub use model::UsageSnapshot;
