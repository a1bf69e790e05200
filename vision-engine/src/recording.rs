//! Screen-recording session: a cancellable background worker capped at
//! sixty seconds of capture. External collaborator of the simulation —
//! it never touches the device registry.
//!
//! The worker polls a frame source at a fixed rate and stops on the
//! first of: shared stop flag cleared, wall-clock deadline reached, or
//! write error. The output file is flushed and closed on every exit
//! path. Starting while active and stopping while idle are informative
//! no-ops.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{error, info};

pub const MAX_RECORDING_SECS: u64 = 60;
pub const FRAME_RATE: u32 = 20;

/// Source of captured frames. The engine ships a synthetic source;
/// a real capture backend would live outside the simulation.
pub trait FrameSource: Send + 'static {
    fn grab(&mut self) -> Vec<u8>;
}

/// Deterministic stand-in frames: a small counter-stamped byte block.
#[derive(Default)]
pub struct SyntheticFrames {
    counter: u64,
}

impl FrameSource for SyntheticFrames {
    fn grab(&mut self) -> Vec<u8> {
        self.counter += 1;
        let mut frame = self.counter.to_be_bytes().to_vec();
        frame.resize(64, 0x2a);
        frame
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingStatus {
    Started,
    AlreadyActive,
    Stopped,
    NotActive,
}

impl RecordingStatus {
    pub fn message(self) -> &'static str {
        match self {
            RecordingStatus::Started => "Screen recording started for up to 1 minute.",
            RecordingStatus::AlreadyActive => "Screen recording is already in progress.",
            RecordingStatus::Stopped => "Screen recording stopped.",
            RecordingStatus::NotActive => "No screen recording is currently active.",
        }
    }
}

pub struct ScreenRecorder {
    output_path: PathBuf,
    active: Arc<AtomicBool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl ScreenRecorder {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            active: Arc::new(AtomicBool::new(false)),
            worker: Mutex::new(None),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn start(&self) -> RecordingStatus {
        self.start_with(SyntheticFrames::default())
    }

    pub fn start_with<S: FrameSource>(&self, source: S) -> RecordingStatus {
        let mut worker = self.worker.lock();
        if self.active.swap(true, Ordering::SeqCst) {
            return RecordingStatus::AlreadyActive;
        }

        // Reap a worker that already hit its deadline.
        if let Some(handle) = worker.take() {
            let _ = handle.join();
        }

        let flag = Arc::clone(&self.active);
        let path = self.output_path.clone();
        info!(path = %path.display(), "Screen recording started");
        *worker = Some(std::thread::spawn(move || {
            if let Err(e) = capture_loop(&path, source, &flag) {
                error!(error = %e, "Screen recording failed");
            }
            // Natural expiry and errors both leave the session idle.
            flag.store(false, Ordering::SeqCst);
        }));
        RecordingStatus::Started
    }

    pub fn stop(&self) -> RecordingStatus {
        if !self.active.swap(false, Ordering::SeqCst) {
            return RecordingStatus::NotActive;
        }
        if let Some(handle) = self.worker.lock().take() {
            let _ = handle.join();
        }
        info!("Screen recording stopped");
        RecordingStatus::Stopped
    }
}

impl Drop for ScreenRecorder {
    fn drop(&mut self) {
        self.stop();
    }
}

fn capture_loop<S: FrameSource>(
    path: &Path,
    mut source: S,
    flag: &AtomicBool,
) -> io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    let frame_budget = Duration::from_millis(1000 / FRAME_RATE as u64);
    let deadline = Instant::now() + Duration::from_secs(MAX_RECORDING_SECS);

    while flag.load(Ordering::SeqCst) && Instant::now() < deadline {
        out.write_all(&source.grab())?;
        std::thread::sleep(frame_budget);
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_output(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("vision-recorder-test-{name}.bin"))
    }

    #[test]
    fn double_start_is_a_noop() {
        let recorder = ScreenRecorder::new(temp_output("double-start"));
        assert_eq!(recorder.start(), RecordingStatus::Started);
        assert_eq!(recorder.start(), RecordingStatus::AlreadyActive);
        assert!(recorder.is_active());
        assert_eq!(recorder.stop(), RecordingStatus::Stopped);
    }

    #[test]
    fn stop_without_start_is_a_noop() {
        let recorder = ScreenRecorder::new(temp_output("idle-stop"));
        assert_eq!(recorder.stop(), RecordingStatus::NotActive);
    }

    #[test]
    fn stopped_session_releases_output() {
        let path = temp_output("release");
        let recorder = ScreenRecorder::new(&path);
        recorder.start();
        std::thread::sleep(Duration::from_millis(200));
        recorder.stop();
        assert!(!recorder.is_active());
        let written = std::fs::metadata(&path).expect("output file exists").len();
        assert!(written > 0, "worker wrote at least one frame");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn session_restarts_after_stop() {
        let recorder = ScreenRecorder::new(temp_output("restart"));
        recorder.start();
        recorder.stop();
        assert_eq!(recorder.start(), RecordingStatus::Started);
        recorder.stop();
    }
}
