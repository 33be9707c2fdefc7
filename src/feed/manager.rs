use std::future::Future;
use std::time::Duration;
use uuid::Uuid;

use crate::schema::{parse_frame, InboundMessage};

use super::reconnect::ReconnectTimer;
use super::session::{Connector, Session, SessionEvent};

/// Upper bound on a close handshake; a half-dead socket may never answer.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Receiver of successfully parsed feed messages.
pub trait MessageSink {
    fn deliver(&mut self, message: InboundMessage);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FeedStats {
    pub connects: u64,
    pub failed_connects: u64,
    pub disconnects: u64,
    pub frames: u64,
    pub malformed_frames: u64,
}

struct ActiveSession<S> {
    id: Uuid,
    inner: S,
}

/// Keeps one session to the feed open and forwards its messages.
///
/// Any loss of the session, including a failed connection attempt, arms a
/// fixed-delay reconnect. There is no retry limit.
pub struct ConnectionManager<C: Connector> {
    connector: C,
    endpoint: String,
    session: Option<ActiveSession<C::Session>>,
    reconnect: ReconnectTimer,
    stats: FeedStats,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C, endpoint: impl Into<String>, reconnect_delay: Duration) -> Self {
        Self {
            connector,
            endpoint: endpoint.into(),
            session: None,
            reconnect: ReconnectTimer::new(reconnect_delay),
            stats: FeedStats::default(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn stats(&self) -> FeedStats {
        self.stats
    }

    #[allow(dead_code)]
    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    #[allow(dead_code)]
    pub fn reconnect_pending(&self) -> bool {
        self.reconnect.is_pending()
    }

    /// Opens a new session, superseding any pending reconnect.
    pub async fn connect(&mut self) {
        self.reconnect.cancel();
        let id = Uuid::new_v4();
        log::info!("Connecting to {} (session {})", self.endpoint, id);

        match self.connector.connect(&self.endpoint).await {
            Ok(inner) => {
                self.stats.connects += 1;
                log::info!("Feed connected (session {})", id);
                self.session = Some(ActiveSession { id, inner });
            }
            Err(e) => {
                self.stats.failed_connects += 1;
                log::warn!("Failed to connect to {}: {}", self.endpoint, e);
                self.schedule_reconnect();
            }
        }
    }

    /// Arms the reconnect timer. Returns false if one was already pending.
    pub fn schedule_reconnect(&mut self) -> bool {
        let scheduled = self.reconnect.schedule();
        if scheduled {
            log::warn!(
                "Reconnecting to {} in {} ms",
                self.endpoint,
                self.reconnect.delay().as_millis()
            );
        }
        scheduled
    }

    /// Drives the feed until `shutdown` resolves.
    pub async fn run<K, F>(&mut self, sink: &mut K, shutdown: F)
    where
        K: MessageSink,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = self.step(sink) => {}
            }
        }

        if let Some(session) = self.session.take() {
            log::info!("Closing feed session {}", session.id);
            close_session(session).await;
        }
        self.reconnect.cancel();
    }

    async fn step<K: MessageSink>(&mut self, sink: &mut K) {
        let event = match self.session.as_mut() {
            Some(session) => session.inner.next_event().await,
            None => {
                self.reconnect.expired().await;
                self.connect().await;
                return;
            }
        };

        match event {
            SessionEvent::Frame(payload) => self.handle_frame(&payload, sink),
            SessionEvent::Error(e) => {
                let session = self.session.take();
                self.on_disconnected();
                if let Some(session) = session {
                    log::warn!("Feed session {} failed: {}", session.id, e);
                    close_session(session).await;
                }
            }
            SessionEvent::Closed(reason) => {
                if let Some(session) = self.session.take() {
                    log::warn!(
                        "Feed session {} closed: {}",
                        session.id,
                        reason.as_deref().unwrap_or("no reason given")
                    );
                }
                self.on_disconnected();
            }
        }
    }

    fn handle_frame<K: MessageSink>(&mut self, payload: &[u8], sink: &mut K) {
        self.stats.frames += 1;
        match parse_frame(payload) {
            Ok(message) => sink.deliver(message),
            Err(e) => {
                self.stats.malformed_frames += 1;
                log::warn!("Discarding feed frame: {}", e);
            }
        }
    }

    fn on_disconnected(&mut self) {
        self.stats.disconnects += 1;
        self.schedule_reconnect();
    }
}

async fn close_session<S: Session>(mut session: ActiveSession<S>) {
    if tokio::time::timeout(CLOSE_TIMEOUT, session.inner.close())
        .await
        .is_err()
    {
        log::warn!(
            "Feed session {} did not close within {} ms",
            session.id,
            CLOSE_TIMEOUT.as_millis()
        );
    }
}
