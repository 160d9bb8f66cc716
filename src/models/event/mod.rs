pub mod types;
pub mod normalize;
pub mod query;
pub mod store;

pub use types::*;
pub use normalize::{normalize_event, resolve_alias};
pub use query::{events_for_date, upcoming};
pub use store::{EventStore, MountGuard};
