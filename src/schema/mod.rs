mod error;
mod parsing;
mod types;

pub use error::{FrameError, RecordError};
pub use parsing::{parse_frame, parse_record};
pub use types::{Alert, InboundMessage, ObjectId, ObjectKind, ObjectRecord, RiskClass, Vector3};
