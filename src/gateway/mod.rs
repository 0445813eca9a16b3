pub mod events;
pub mod heartbeat;
pub mod session;

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::commands::CommandDispatcher;
use crate::config::Config;
use crate::error::Error;
use crate::rest::RestClient;
use crate::runes::RuneBook;
use events::{Frame, HelloData, MessageAuthor, MessageCreate, Opcode};
use heartbeat::Sequence;
use session::{GatewaySender, GatewayStream};

/// Connection phases. `Connecting` is the time spent inside
/// [`session::connect`] and `Closed` is reached by returning from the frame
/// loop, so only the phases the loop distinguishes are represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConnState {
    AwaitingHello,
    Identified,
    Running,
}

/// Drives one gateway session: handshake, heartbeat, event dispatch.
/// A session that closes or faults ends `run` with an error; there is no
/// reconnect.
pub struct GatewayClient {
    config: Arc<Config>,
    rest: Arc<RestClient>,
    commands: CommandDispatcher,
}

impl GatewayClient {
    pub fn new(config: Arc<Config>, rest: Arc<RestClient>, runes: Arc<RuneBook>) -> Self {
        let commands = CommandDispatcher::new(
            Arc::clone(&rest),
            runes,
            config.command_prefix.clone(),
        );
        Self {
            config,
            rest,
            commands,
        }
    }

    /// Resolve the gateway URL, connect, and consume frames until the
    /// session ends. Always returns `Err`: a healthy session runs until the
    /// peer closes it, and a close is fatal by contract.
    pub async fn run(&self) -> Result<(), Error> {
        let gateway_url = self.rest.gateway_url().await?;
        tracing::info!("connecting to gateway at {gateway_url}");
        let (sender, mut stream) = session::connect(&gateway_url).await?;

        let seq = Arc::new(Sequence::new());
        let mut heartbeat: Option<JoinHandle<()>> = None;

        let result = self.drive(&sender, &mut stream, &seq, &mut heartbeat).await;

        // Tear the heartbeat down with the session so no beat can be sent
        // after the session is closed.
        if let Some(hb) = heartbeat.take() {
            hb.abort();
        }
        result
    }

    async fn drive(
        &self,
        sender: &GatewaySender,
        stream: &mut GatewayStream,
        seq: &Arc<Sequence>,
        heartbeat: &mut Option<JoinHandle<()>>,
    ) -> Result<(), Error> {
        let mut state = ConnState::AwaitingHello;

        loop {
            let frame = match stream.next_frame().await {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    tracing::info!("gateway closed the stream");
                    return Err(Error::StreamClosed);
                }
                // Malformed frames are fatal only during the handshake.
                Err(Error::Protocol(msg)) if state != ConnState::AwaitingHello => {
                    tracing::warn!("dropping malformed frame: {msg}");
                    continue;
                }
                Err(e) => return Err(e),
            };

            match frame.opcode() {
                Some(Opcode::Hello) => {
                    if heartbeat.is_some() {
                        // A second HELLO must not start a second timer.
                        tracing::warn!("duplicate HELLO, keeping existing heartbeat");
                        continue;
                    }
                    let hello: HelloData = frame
                        .data
                        .ok_or_else(|| Error::Protocol("HELLO without payload".to_string()))
                        .and_then(|d| serde_json::from_value(d).map_err(Error::from))?;

                    sender.send(&Frame::identify(&self.config.token)).await?;
                    if let Some(s) = frame.seq {
                        seq.record(s);
                    }
                    *heartbeat = Some(heartbeat::spawn(
                        sender.clone(),
                        Duration::from_millis(hello.heartbeat_interval),
                        Arc::clone(seq),
                    ));
                    state = ConnState::Identified;
                    tracing::info!(
                        "identified; heartbeating every {}ms",
                        hello.heartbeat_interval
                    );
                }
                Some(Opcode::HeartbeatAck) => {
                    tracing::trace!("heartbeat acknowledged");
                }
                Some(Opcode::Dispatch) => {
                    if state == ConnState::AwaitingHello {
                        tracing::warn!("dispatch before handshake, dropping");
                        continue;
                    }
                    if let Some(s) = frame.seq {
                        seq.record(s);
                    }
                    state = ConnState::Running;
                    self.route(frame.event_type.as_deref().unwrap_or(""), frame.data);
                }
                // Client-to-server ops; a server never sends these.
                Some(Opcode::Heartbeat) | Some(Opcode::Identify) => {}
                None => {
                    tracing::trace!("ignoring unknown op {}", frame.op);
                }
            }
        }
    }

    /// Decode a dispatch event and hand chat messages to the command layer.
    /// Command handling runs on its own task; its failures are logged (and
    /// flagged with a reaction where possible) but never end the session.
    fn route(&self, event_type: &str, data: Option<serde_json::Value>) {
        if event_type != "MESSAGE_CREATE" {
            tracing::trace!("ignoring event {event_type}");
            return;
        }
        let Some(data) = data else {
            tracing::warn!("MESSAGE_CREATE without payload, dropping");
            return;
        };
        let msg: MessageCreate = match serde_json::from_value(data) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("dropping malformed MESSAGE_CREATE: {e}");
                return;
            }
        };
        if self.is_own_message(&msg.author) {
            tracing::trace!("ignoring own message {}", msg.id);
            return;
        }

        let content = msg.content.to_lowercase();
        let commands = self.commands.clone();
        let rest = Arc::clone(&self.rest);
        tokio::spawn(async move {
            if let Err(e) = commands
                .dispatch(&msg.author.id, &msg.channel_id, &content)
                .await
            {
                tracing::error!("command for message {} failed: {e}", msg.id);
                if let Error::Api { .. } = e {
                    // Best effort: make the failure visible in the channel.
                    let _ = rest
                        .add_reaction(&msg.channel_id, &msg.id, "\u{26a0}\u{fe0f}")
                        .await;
                }
            }
        });
    }

    fn is_own_message(&self, author: &MessageAuthor) -> bool {
        if let Some(own_id) = &self.config.bot_user_id {
            if author.id == *own_id {
                return true;
            }
        }
        author.username.eq_ignore_ascii_case(&self.config.bot_username)
    }
}
