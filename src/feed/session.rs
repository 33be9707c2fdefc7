use super::error::FeedError;

#[derive(Debug)]
pub enum SessionEvent {
    /// Payload of a text or binary frame.
    Frame(Vec<u8>),
    Error(FeedError),
    Closed(Option<String>),
}

/// Opens transport sessions to the feed.
#[allow(async_fn_in_trait)]
pub trait Connector {
    type Session: Session;

    async fn connect(&mut self, endpoint: &str) -> Result<Self::Session, FeedError>;
}

#[allow(async_fn_in_trait)]
pub trait Session {
    /// Next data frame or terminal event. Control frames are not reported.
    async fn next_event(&mut self) -> SessionEvent;

    async fn close(&mut self);
}
