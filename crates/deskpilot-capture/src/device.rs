//! Audio collaborator traits and the finished-capture payload.

use crate::error::DeviceError;

/// An open microphone session producing fixed-size PCM frames.
///
/// `read_frame` blocks until one frame is available; the controller polls
/// its stop flag between reads, so frame length bounds stop latency.
pub trait AudioSource: Send {
    /// Sample rate of the produced PCM data in Hz.
    fn sample_rate(&self) -> u32;
    /// Samples per frame.
    fn frame_length(&self) -> usize;
    /// Blocking read of the next frame.
    fn read_frame(&mut self) -> Result<Vec<i16>, DeviceError>;
}

/// Factory for microphone sessions; the OS audio driver behind it is an
/// opaque collaborator.
pub trait AudioDevice: Send + Sync {
    /// Acquire the device for one capture session.
    fn open(&self) -> Result<Box<dyn AudioSource>, DeviceError>;
}

/// A finalized capture: the assembled linear PCM buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAudio {
    /// Mono 16-bit PCM samples in read order.
    pub samples: Vec<i16>,
    /// Sample rate the frames were captured at.
    pub sample_rate: u32,
    /// Number of whole frames the buffer was assembled from.
    pub frames: usize,
}

impl RecordedAudio {
    /// Capture duration in seconds.
    pub fn seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}
