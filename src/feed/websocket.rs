use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::{
    connect_async, tungstenite::protocol::Message, MaybeTlsStream, WebSocketStream,
};

use super::error::FeedError;
use super::session::{Connector, Session, SessionEvent};

#[derive(Debug, Default)]
pub struct WsConnector;

pub struct WsSession {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl Connector for WsConnector {
    type Session = WsSession;

    async fn connect(&mut self, endpoint: &str) -> Result<WsSession, FeedError> {
        let (stream, response) = connect_async(endpoint).await?;
        log::debug!("Websocket handshake completed: {}", response.status());
        Ok(WsSession { stream })
    }
}

impl Session for WsSession {
    async fn next_event(&mut self) -> SessionEvent {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return SessionEvent::Frame(text.into_bytes()),
                Some(Ok(Message::Binary(data))) => return SessionEvent::Frame(data),
                Some(Ok(Message::Close(frame))) => {
                    return SessionEvent::Closed(frame.map(|f| f.reason.into_owned()))
                }
                // Pings are answered by tungstenite while reading.
                Some(Ok(_)) => continue,
                Some(Err(e)) => return SessionEvent::Error(e.into()),
                None => return SessionEvent::Closed(None),
            }
        }
    }

    async fn close(&mut self) {
        if let Err(e) = self.stream.close(None).await {
            log::debug!("Error closing websocket: {}", e);
        }
    }
}
