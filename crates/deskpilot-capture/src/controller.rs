//! Capture controller: one-shot and toggled recording over an audio device.

use crate::device::{AudioDevice, RecordedAudio};
use crate::error::CaptureError;
use deskpilot_protocol::{EventSink, Role, SessionEvent};
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;

/// State machine governing microphone acquisition.
///
/// At most one capture session is active process-wide; a start request while
/// one is in flight is rejected (one-shot) or ignored (toggle), never queued.
pub struct CaptureController {
    device: Arc<dyn AudioDevice>,
    scratch_path: PathBuf,
    /// Process-wide mutual-exclusion flag for capture sessions.
    busy: Arc<AtomicBool>,
    /// Stop flag polled by the toggled read loop once per frame.
    active: Arc<AtomicBool>,
    toggled: Mutex<Option<JoinHandle<Result<RecordedAudio, CaptureError>>>>,
    event_sink: Option<Arc<dyn EventSink>>,
}

impl CaptureController {
    /// Create a controller writing finished captures to `scratch_path`.
    pub fn new(
        device: Arc<dyn AudioDevice>,
        scratch_path: impl Into<PathBuf>,
        event_sink: Option<Arc<dyn EventSink>>,
    ) -> Self {
        Self {
            device,
            scratch_path: scratch_path.into(),
            busy: Arc::new(AtomicBool::new(false)),
            active: Arc::new(AtomicBool::new(false)),
            toggled: Mutex::new(None),
            event_sink,
        }
    }

    /// Location of the scratch WAV file.
    pub fn scratch_path(&self) -> &Path {
        &self.scratch_path
    }

    /// Whether a capture session is currently active.
    pub fn is_recording(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Capture exactly `frame_limit` frames and finalize the scratch file.
    pub async fn one_shot(&self, frame_limit: usize) -> Result<RecordedAudio, CaptureError> {
        self.begin()?;
        self.emit(SessionEvent::recording());

        let device = self.device.clone();
        let active = self.active.clone();
        let scratch = self.scratch_path.clone();
        let handle = tokio::task::spawn_blocking(move || {
            capture_frames(device.as_ref(), Some(frame_limit), &active, &scratch)
        });
        let result = handle
            .await
            .map_err(|err| CaptureError::Task(err.to_string()))
            .and_then(|inner| inner);
        self.finish(&result);
        result
    }

    /// Begin unbounded capture; stopped by `toggle_stop`.
    ///
    /// A start while any capture is active is a logged no-op.
    pub fn toggle_start(&self) {
        if self.busy.swap(true, Ordering::AcqRel) {
            warn!("already recording, skipping toggle start");
            return;
        }
        self.active.store(true, Ordering::Release);
        self.emit(SessionEvent::recording());

        let device = self.device.clone();
        let active = self.active.clone();
        let scratch = self.scratch_path.clone();
        let handle = tokio::task::spawn_blocking(move || {
            capture_frames(device.as_ref(), None, &active, &scratch)
        });
        *self.toggled.lock() = Some(handle);
        debug!("toggled capture started");
    }

    /// Stop the in-flight toggled capture and return the finalized buffer.
    ///
    /// The read loop observes the stop flag at its next frame boundary, so
    /// at most one extra frame lands in the buffer after this call.
    pub async fn toggle_stop(&self) -> Result<RecordedAudio, CaptureError> {
        let handle = self
            .toggled
            .lock()
            .take()
            .ok_or(CaptureError::NotRecording)?;
        self.active.store(false, Ordering::Release);
        let result = handle
            .await
            .map_err(|err| CaptureError::Task(err.to_string()))
            .and_then(|inner| inner);
        self.finish(&result);
        result
    }

    /// Claim the mutual-exclusion flag or reject the start request.
    fn begin(&self) -> Result<(), CaptureError> {
        if self.busy.swap(true, Ordering::AcqRel) {
            warn!("already recording, skipping start request");
            return Err(CaptureError::Busy);
        }
        Ok(())
    }

    /// Release the flag and report the capture outcome downstream.
    fn finish(&self, result: &Result<RecordedAudio, CaptureError>) {
        self.busy.store(false, Ordering::Release);
        self.active.store(false, Ordering::Release);
        match result {
            Ok(audio) => {
                info!(
                    "recorded {} frames: {:.1} seconds",
                    audio.frames,
                    audio.seconds()
                );
                self.emit(SessionEvent::recording_done());
            }
            Err(err) => {
                warn!("capture aborted: {err}");
                self.emit(SessionEvent::transcription(
                    Role::System,
                    format!("[Recording failed: {err}]"),
                ));
            }
        }
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(sink) = &self.event_sink {
            sink.emit(event);
        }
    }
}

/// Run the blocking read loop and finalize the scratch WAV file.
///
/// With a frame limit, exactly that many frames are read. Without one, the
/// stop flag is polled after every frame read; frames past the stop are
/// simply absent, never zero-filled.
fn capture_frames(
    device: &dyn AudioDevice,
    limit: Option<usize>,
    active: &AtomicBool,
    scratch: &Path,
) -> Result<RecordedAudio, CaptureError> {
    let mut source = device.open()?;
    let sample_rate = source.sample_rate();
    let frame_length = source.frame_length();
    let mut samples: Vec<i16> = Vec::with_capacity(limit.unwrap_or(1) * frame_length);
    let mut frames = 0usize;

    loop {
        let frame = source.read_frame()?;
        samples.extend_from_slice(&frame);
        frames += 1;

        match limit {
            Some(limit) if frames >= limit => break,
            Some(_) => (),
            None => {
                if !active.load(Ordering::Acquire) {
                    debug!("stop flag observed, ending toggled capture");
                    break;
                }
            }
        }
    }
    drop(source);

    let audio = RecordedAudio {
        samples,
        sample_rate,
        frames,
    };
    write_scratch(scratch, &audio)?;
    Ok(audio)
}

/// Overwrite the scratch WAV file with the finished capture.
fn write_scratch(path: &Path, audio: &RecordedAudio) -> Result<(), CaptureError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for sample in &audio.samples {
        writer.write_sample(*sample)?;
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::CaptureController;
    use crate::device::{AudioDevice, AudioSource};
    use crate::error::{CaptureError, DeviceError};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::time::Duration;
    use tempfile::tempdir;

    const FRAME_LENGTH: usize = 8;

    /// Device producing silent frames with a small per-frame delay.
    struct SlowDevice {
        opens: AtomicUsize,
    }

    impl SlowDevice {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                opens: AtomicUsize::new(0),
            })
        }
    }

    impl AudioDevice for SlowDevice {
        fn open(&self) -> Result<Box<dyn AudioSource>, DeviceError> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(SlowSource))
        }
    }

    struct SlowSource;

    impl AudioSource for SlowSource {
        fn sample_rate(&self) -> u32 {
            16_000
        }

        fn frame_length(&self) -> usize {
            FRAME_LENGTH
        }

        fn read_frame(&mut self) -> Result<Vec<i16>, DeviceError> {
            std::thread::sleep(Duration::from_millis(2));
            Ok(vec![0; FRAME_LENGTH])
        }
    }

    /// Device whose frames are released one-by-one through a channel.
    struct GatedDevice {
        frames: parking_lot::Mutex<Option<mpsc::Receiver<Vec<i16>>>>,
        read: Arc<AtomicUsize>,
    }

    struct GatedSource {
        frames: mpsc::Receiver<Vec<i16>>,
        read: Arc<AtomicUsize>,
    }

    impl AudioDevice for GatedDevice {
        fn open(&self) -> Result<Box<dyn AudioSource>, DeviceError> {
            let frames = self
                .frames
                .lock()
                .take()
                .ok_or_else(|| DeviceError::new("device already open"))?;
            Ok(Box::new(GatedSource {
                frames,
                read: self.read.clone(),
            }))
        }
    }

    impl AudioSource for GatedSource {
        fn sample_rate(&self) -> u32 {
            16_000
        }

        fn frame_length(&self) -> usize {
            FRAME_LENGTH
        }

        fn read_frame(&mut self) -> Result<Vec<i16>, DeviceError> {
            let frame = self
                .frames
                .recv()
                .map_err(|_| DeviceError::new("stream closed"))?;
            self.read.fetch_add(1, Ordering::SeqCst);
            Ok(frame)
        }
    }

    struct BrokenDevice;

    impl AudioDevice for BrokenDevice {
        fn open(&self) -> Result<Box<dyn AudioSource>, DeviceError> {
            Err(DeviceError::new("no input device"))
        }
    }

    #[tokio::test]
    async fn one_shot_reads_exactly_the_requested_frames() {
        let temp = tempdir().expect("tempdir");
        let controller = CaptureController::new(
            SlowDevice::new(),
            temp.path().join("output.wav"),
            None,
        );

        let audio = controller.one_shot(156).await.expect("capture");
        assert_eq!(audio.frames, 156);
        assert_eq!(audio.samples.len(), 156 * FRAME_LENGTH);
        assert_eq!(temp.path().join("output.wav").exists(), true);
    }

    #[tokio::test]
    async fn concurrent_starts_yield_one_recorder_lifecycle() {
        let temp = tempdir().expect("tempdir");
        let device = SlowDevice::new();
        let controller = CaptureController::new(
            device.clone(),
            temp.path().join("output.wav"),
            None,
        );

        let (first, second) = tokio::join!(controller.one_shot(4), controller.one_shot(4));
        let outcomes = [first.is_ok(), second.is_ok()];
        assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
        assert_eq!(device.opens.load(Ordering::SeqCst), 1);
        assert_eq!(
            matches!(
                [first, second].into_iter().find(|r| r.is_err()),
                Some(Err(CaptureError::Busy))
            ),
            true
        );
    }

    #[tokio::test]
    async fn toggle_stops_within_one_frame_of_the_signal() {
        let temp = tempdir().expect("tempdir");
        let (sender, receiver) = mpsc::channel();
        let read = Arc::new(AtomicUsize::new(0));
        let device = Arc::new(GatedDevice {
            frames: parking_lot::Mutex::new(Some(receiver)),
            read: read.clone(),
        });
        let controller =
            CaptureController::new(device, temp.path().join("output.wav"), None);

        controller.toggle_start();
        for _ in 0..3 {
            sender.send(vec![1; FRAME_LENGTH]).expect("send frame");
        }
        while read.load(Ordering::SeqCst) < 3 {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        // The loop is blocked inside a frame read; the stop flag must be
        // observed as soon as that read returns. The stop future is polled
        // first so the flag is down before the final frame is released.
        let (stopped, _) = tokio::join!(controller.toggle_stop(), async {
            sender.send(vec![1; FRAME_LENGTH]).expect("send final frame");
        });
        let audio = stopped.expect("stop");
        assert_eq!(audio.frames <= 4, true);
        assert_eq!(audio.samples.len(), audio.frames * FRAME_LENGTH);
    }

    #[tokio::test]
    async fn toggle_start_while_busy_is_a_no_op() {
        let temp = tempdir().expect("tempdir");
        let (sender, receiver) = mpsc::channel();
        let read = Arc::new(AtomicUsize::new(0));
        let device = Arc::new(GatedDevice {
            frames: parking_lot::Mutex::new(Some(receiver)),
            read,
        });
        let controller =
            CaptureController::new(device, temp.path().join("output.wav"), None);

        controller.toggle_start();
        // second start must not panic, queue, or disturb the first session
        controller.toggle_start();

        sender.send(vec![0; FRAME_LENGTH]).expect("send frame");
        let (stopped, _) = tokio::join!(controller.toggle_stop(), async {
            // the loop may have already stopped on the first frame
            let _ = sender.send(vec![0; FRAME_LENGTH]);
        });
        let audio = stopped.expect("stop");
        assert_eq!(audio.frames >= 1, true);
        assert_eq!(controller.is_recording(), false);
    }

    #[tokio::test]
    async fn device_failure_aborts_cleanly() {
        let temp = tempdir().expect("tempdir");
        let controller = CaptureController::new(
            Arc::new(BrokenDevice),
            temp.path().join("output.wav"),
            None,
        );

        let err = controller.one_shot(4).await.expect_err("device error");
        assert_eq!(matches!(err, CaptureError::Device(_)), true);
        // the controller accepts a new trigger afterwards
        assert_eq!(controller.is_recording(), false);
    }

    #[tokio::test]
    async fn toggle_stop_without_start_is_rejected() {
        let temp = tempdir().expect("tempdir");
        let controller = CaptureController::new(
            SlowDevice::new(),
            temp.path().join("output.wav"),
            None,
        );
        let err = controller.toggle_stop().await.expect_err("not recording");
        assert_eq!(matches!(err, CaptureError::NotRecording), true);
    }
}
