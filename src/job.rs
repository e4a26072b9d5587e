//! Job lifecycle for the partitioned pipeline.
//!
//! The orchestrator identifies a run by its job name. A [`Job`] is opened before
//! extraction and committed only after every dataset has been written; dropping an
//! uncommitted job logs that the run did not complete.

use std::time::Instant;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct Job {
    name: String,
    started: Instant,
    committed: bool,
}

impl Job {
    /// Register the start of a run.
    pub fn init(name: impl Into<String>) -> Self {
        let name = name.into();
        debug!(job = %name, "job initialized");
        Self {
            name,
            started: Instant::now(),
            committed: false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn is_committed(&self) -> bool {
        self.committed
    }

    /// Mark the run as successfully completed.
    pub fn commit(&mut self) {
        self.committed = true;
        debug!(
            job = %self.name,
            elapsed_ms = self.started.elapsed().as_millis(),
            "job committed"
        );
    }
}

impl Drop for Job {
    fn drop(&mut self) {
        if !self.committed {
            warn!(job = %self.name, "job ended without commit");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logged_at_info(f: impl FnOnce()) -> String {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = out.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn committed_job_is_silent_at_info() {
        let log = logged_at_info(|| {
            let mut job = Job::init("quiet");
            job.commit();
            assert!(job.is_committed());
        });
        assert!(log.is_empty(), "{log}");
    }

    #[test]
    fn uncommitted_job_warns_on_drop() {
        let log = logged_at_info(|| drop(Job::init("abandoned")));
        assert!(log.contains("job ended without commit"), "{log}");
        assert!(log.contains("abandoned"), "{log}");
    }
}
