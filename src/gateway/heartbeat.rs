use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use super::events::Frame;
use super::session::GatewaySender;

/// Last-seen Dispatch sequence number, shared between the frame loop
/// (writer) and the heartbeat task (reader). -1 means none observed yet.
#[derive(Debug)]
pub struct Sequence(AtomicI64);

impl Sequence {
    pub fn new() -> Self {
        Sequence(AtomicI64::new(-1))
    }

    pub fn record(&self, seq: u64) {
        // Saturate so a value above i64::MAX cannot wrap into the sentinel
        // range and read back as "none yet".
        self.0.store(seq.min(i64::MAX as u64) as i64, Ordering::Relaxed);
    }

    pub fn get(&self) -> Option<u64> {
        match self.0.load(Ordering::Relaxed) {
            n if n < 0 => None,
            n => Some(n as u64),
        }
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Start the heartbeat loop for a session. The sequence cell is read at
/// send time so every heartbeat reports the latest observed value. The task
/// stops on its own when a send fails and is aborted on session teardown;
/// it never outlives the session.
pub fn spawn(sender: GatewaySender, interval: Duration, seq: Arc<Sequence>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            let frame = Frame::heartbeat(seq.get());
            if let Err(e) = sender.send(&frame).await {
                tracing::debug!("heartbeat send failed, stopping: {e}");
                break;
            }
            tracing::trace!("heartbeat sent (seq {:?})", seq.get());
        }
    })
}
