//! Recording capture launcher for tests.
//!
//! Spawns nothing.  Every launch is recorded together with a shared "alive"
//! flag so tests can assert how many capture processes exist at any moment
//! and can make one exit on its own with [`RecordingCaptureLauncher::exit_all`].

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::application::supervise_capture::{
    CaptureError, CaptureLauncher, CaptureProcess, CaptureRequest,
};

struct Launched {
    request: CaptureRequest,
    alive: Arc<AtomicBool>,
}

#[derive(Default)]
pub struct RecordingCaptureLauncher {
    launched: Mutex<Vec<Launched>>,
    /// When true every launch fails with a "not found" error.
    pub should_fail: bool,
}

impl RecordingCaptureLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Requests of every successful launch, oldest first.
    pub fn requests(&self) -> Vec<CaptureRequest> {
        self.launched
            .lock()
            .map(|l| l.iter().map(|p| p.request.clone()).collect())
            .unwrap_or_default()
    }

    /// Number of launched processes that have not been killed or exited.
    pub fn live_count(&self) -> usize {
        self.launched
            .lock()
            .map(|l| l.iter().filter(|p| p.alive.load(Ordering::SeqCst)).count())
            .unwrap_or_default()
    }

    /// Makes every live process exit on its own.
    pub fn exit_all(&self) {
        if let Ok(launched) = self.launched.lock() {
            for process in launched.iter() {
                process.alive.store(false, Ordering::SeqCst);
            }
        }
    }
}

impl CaptureLauncher for RecordingCaptureLauncher {
    fn launch(&self, request: &CaptureRequest) -> Result<Box<dyn CaptureProcess>, CaptureError> {
        if self.should_fail {
            return Err(CaptureError::Launch {
                program: "recording".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "launch disabled"),
            });
        }

        let alive = Arc::new(AtomicBool::new(true));
        let mut launched = self
            .launched
            .lock()
            .map_err(|_| CaptureError::Launch {
                program: "recording".to_string(),
                source: io::Error::new(io::ErrorKind::Other, "launcher state poisoned"),
            })?;
        let pid = launched.len() as u32 + 1;
        launched.push(Launched {
            request: request.clone(),
            alive: Arc::clone(&alive),
        });

        Ok(Box::new(RecordedProcess { pid, alive }))
    }
}

struct RecordedProcess {
    pid: u32,
    alive: Arc<AtomicBool>,
}

impl CaptureProcess for RecordedProcess {
    fn id(&self) -> Option<u32> {
        Some(self.pid)
    }

    fn kill(&mut self) -> io::Result<()> {
        self.alive.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn try_exit_status(&mut self) -> io::Result<Option<String>> {
        Ok((!self.alive.load(Ordering::SeqCst)).then(|| "exit status: 1".to_string()))
    }
}
