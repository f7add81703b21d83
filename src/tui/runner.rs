use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::event::{Event, ScanEvent};
use crate::config::PacingConfig;
use crate::environment::Snapshot;
use crate::scanner::{evaluate, CheckId, RunId};

/// Evaluate the battery on a background task, pausing before each check.
///
/// The task only reports progress. Whether an update is applied is decided by
/// the receiving [`crate::scanner::Scanner`], which ignores stale runs.
pub fn spawn_paced_scan(
    run: RunId,
    snapshot: Arc<Snapshot>,
    pacing: PacingConfig,
    tx: mpsc::UnboundedSender<Event>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(pacing.start_delay()).await;

        for id in CheckId::ALL {
            if tx.send(Event::Scan(ScanEvent::Running { run, id })).is_err() {
                return;
            }
            tokio::time::sleep(pacing.delay_for(id)).await;

            let outcome = evaluate(id, snapshot.as_ref());
            if tx
                .send(Event::Scan(ScanEvent::Resolved { run, id, outcome }))
                .is_err()
            {
                return;
            }
        }

        let _ = tx.send(Event::Scan(ScanEvent::Finished { run }));
    })
}
