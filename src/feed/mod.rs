mod endpoint;
mod error;
mod manager;
mod reconnect;
mod session;
mod websocket;

pub use endpoint::{select_endpoint, validate_endpoint};
pub use error::FeedError;
pub use manager::{ConnectionManager, FeedStats, MessageSink};
pub use reconnect::{ReconnectTimer, RECONNECT_DELAY};
pub use session::{Connector, Session, SessionEvent};
pub use websocket::WsConnector;
