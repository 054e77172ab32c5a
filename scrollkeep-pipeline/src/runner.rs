//! Bounded concurrent fan-out over [`process`](crate::pipeline::process).
//!
//! `process` itself is synchronous (the store trait is sync, and VT
//! replay is CPU-bound), so each session's pipeline run is dispatched
//! onto a blocking thread via [`tokio::task::spawn_blocking`], gated by a
//! [`tokio::sync::Semaphore`] so at most `fan_out` sessions process at once
//! regardless of how many are queued.

use crate::pipeline::{process, RunConfig};
use scrollkeep_detect::Marker;
use scrollkeep_store::{SectionStore, SessionId};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Dispatches session processing tasks at a configurable maximum
/// concurrency. Cheap to clone; the semaphore is shared across clones.
#[derive(Clone)]
pub struct PipelineRunner {
    store: Arc<dyn SectionStore>,
    config: RunConfig,
    permits: Arc<Semaphore>,
}

impl PipelineRunner {
    pub fn new(store: Arc<dyn SectionStore>, config: RunConfig, fan_out: usize) -> Self {
        PipelineRunner { store, config, permits: Arc::new(Semaphore::new(fan_out.max(1))) }
    }

    /// Spawn a single session's pipeline run. Returns immediately; the
    /// returned handle resolves once processing (including the store
    /// writes that mark the session `Completed` or `Failed`) is done.
    ///
    /// Waits for a free fan-out slot before starting the actual work, so
    /// callers can queue arbitrarily many of these without running more
    /// than `fan_out` replays concurrently.
    pub fn spawn(
        &self,
        file_path: PathBuf,
        session_id: SessionId,
        markers: Vec<Marker>,
    ) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let config = self.config;
        let permits = Arc::clone(&self.permits);

        tokio::spawn(async move {
            let _permit = permits.acquire_owned().await.expect("semaphore never closes");
            let result = tokio::task::spawn_blocking(move || {
                process(&file_path, session_id, &markers, store.as_ref(), config)
            })
            .await;

            match result {
                Ok(Ok(())) => {}
                Ok(Err(err)) => log::error!("session {session_id} pipeline failed: {err}"),
                Err(join_err) => log::error!("session {session_id} pipeline task panicked: {join_err}"),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollkeep_store::{DetectionStatus, InMemorySectionStore, NewSession};
    use std::io::Write;

    fn fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn spawned_runs_complete_and_update_the_store() {
        let store: Arc<dyn SectionStore> = Arc::new(InMemorySectionStore::new());
        let runner = PipelineRunner::new(
            Arc::clone(&store),
            RunConfig::from(crate::config::PipelineConfig::default()),
            2,
        );

        let mut handles = Vec::new();
        for _ in 0..3 {
            let file = fixture("{\"version\":3,\"width\":80,\"height\":24}\n[0.1,\"o\",\"x\\n\"]\n");
            let id = store
                .create_session(NewSession {
                    filename: "demo.cast".into(),
                    filepath: file.path().to_string_lossy().into_owned(),
                    size_bytes: 10,
                    marker_count: 0,
                    uploaded_at: chrono::Utc::now(),
                })
                .unwrap();
            let handle = runner.spawn(file.path().to_path_buf(), id, Vec::new());
            handles.push((handle, id, file));
        }

        for (handle, id, _file) in handles {
            handle.await.unwrap();
            let session = store.get_session(id).unwrap().unwrap();
            assert_eq!(session.detection_status, DetectionStatus::Completed);
        }
    }
}
