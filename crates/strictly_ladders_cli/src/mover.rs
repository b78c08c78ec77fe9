//! Simulated piece movement.
//!
//! The engine hands [`MoveRequest`]s to a [`ChannelMover`]; a background task
//! plays them out and reports arrival of animated moves.

use std::time::Duration;
use strictly_ladders::{Epoch, MoveRequest, Mover};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

/// Forwards move requests to the mover task.
#[derive(Debug, Clone)]
pub struct ChannelMover {
    tx: mpsc::UnboundedSender<MoveRequest>,
}

impl Mover for ChannelMover {
    fn move_to(&mut self, request: MoveRequest) {
        if self.tx.send(request).is_err() {
            warn!(player = %request.player, "Mover task stopped, dropping move");
        }
    }
}

/// Handle to a running mover task.
pub struct MoverTask {
    /// Arrival epochs of completed animated moves.
    pub arrivals: mpsc::UnboundedReceiver<Epoch>,
    handle: JoinHandle<()>,
}

impl MoverTask {
    /// Stops the task.
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

/// Spawns the mover task. Animated moves take `step` per square walked.
#[instrument]
pub fn spawn_mover(step: Duration) -> (ChannelMover, MoverTask) {
    let (tx, mut requests) = mpsc::unbounded_channel::<MoveRequest>();
    let (arrival_tx, arrivals) = mpsc::unbounded_channel();

    let handle = tokio::spawn(async move {
        while let Some(request) = requests.recv().await {
            if !request.animate {
                debug!(player = %request.player, to = request.to, "Teleport");
                continue;
            }
            debug!(
                player = %request.player,
                from = request.from,
                to = request.to,
                "Animating move"
            );
            tokio::time::sleep(step * request.steps()).await;
            if arrival_tx.send(request.epoch).is_err() {
                break;
            }
        }
        debug!("Mover task finished");
    });

    (ChannelMover { tx }, MoverTask { arrivals, handle })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_ladders::PlayerId;

    #[tokio::test]
    async fn test_reports_animated_arrivals_only() {
        let (mut mover, mut task) = spawn_mover(Duration::ZERO);
        let epoch = Epoch::default().next();

        mover.move_to(MoveRequest::new(PlayerId::new(1), 2, 23, false, epoch));
        mover.move_to(MoveRequest::new(PlayerId::new(1), 23, 27, true, epoch));

        assert_eq!(task.arrivals.recv().await, Some(epoch));
        assert!(task.arrivals.try_recv().is_err());
        task.shutdown();
    }
}
