mod adapter;
mod registry;
mod risk;
mod trail;
mod types;

pub use adapter::{LogAdapter, RenderAdapter};
pub use registry::{ProcessReport, Registry, Upsert};
pub use risk::{matching_alert, resolve_risk};
pub use trail::{TrailBuffer, CAPACITY};
pub use types::{ObjectKey, ObjectUpdate, TrackedObject};
