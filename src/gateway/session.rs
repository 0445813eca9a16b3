use std::sync::Arc;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use super::events::Frame;
use crate::error::Error;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Cloneable writing half of the gateway connection. The sink is behind a
/// mutex so the frame loop and the heartbeat task can both send without
/// interleaving partial writes.
#[derive(Clone)]
pub struct GatewaySender {
    sink: Arc<Mutex<SplitSink<WsStream, Message>>>,
}

impl GatewaySender {
    pub async fn send(&self, frame: &Frame) -> Result<(), Error> {
        let text = serde_json::to_string(frame)?;
        let mut sink = self.sink.lock().await;
        sink.send(Message::Text(text.into())).await?;
        Ok(())
    }
}

/// Reading half of the gateway connection, consumed only by the state
/// machine's frame loop.
pub struct GatewayStream {
    stream: SplitStream<WsStream>,
}

impl GatewayStream {
    /// Next decoded frame. `Ok(None)` means the peer closed the stream
    /// gracefully; a transport fault is `Err(Error::Connection)`; a text
    /// frame that is not a valid envelope is `Err(Error::Protocol)` and
    /// leaves the stream usable.
    pub async fn next_frame(&mut self) -> Result<Option<Frame>, Error> {
        while let Some(msg) = self.stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    return serde_json::from_str::<Frame>(text.as_str())
                        .map(Some)
                        .map_err(|e| Error::Protocol(format!("bad frame: {e}")));
                }
                Ok(Message::Close(_)) => return Ok(None),
                // Pings are answered by tungstenite itself; ignore the rest.
                Ok(_) => continue,
                Err(e) => return Err(Error::Connection(e)),
            }
        }
        Ok(None)
    }
}

/// Open the duplex connection to the gateway endpoint.
pub async fn connect(gateway_url: &str) -> Result<(GatewaySender, GatewayStream), Error> {
    let url = format!("{gateway_url}?v=6&encoding=json");
    let (ws, _) = connect_async(url).await?;
    let (sink, stream) = ws.split();
    Ok((
        GatewaySender {
            sink: Arc::new(Mutex::new(sink)),
        },
        GatewayStream { stream },
    ))
}
