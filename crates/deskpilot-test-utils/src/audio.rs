//! Scripted audio devices.

use deskpilot_capture::{AudioDevice, AudioSource, DeviceError};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Receiver;

/// Device producing constant-valued frames, counting opens.
pub struct ScriptedAudioDevice {
    sample_rate: u32,
    frame_length: usize,
    /// Number of capture sessions opened so far.
    pub opens: AtomicUsize,
    /// Frames released one-by-one through a channel, when gated.
    gate: Mutex<Option<Receiver<Vec<i16>>>>,
}

impl ScriptedAudioDevice {
    /// Device that produces silent frames on demand.
    pub fn silent(sample_rate: u32, frame_length: usize) -> Arc<Self> {
        Arc::new(Self {
            sample_rate,
            frame_length,
            opens: AtomicUsize::new(0),
            gate: Mutex::new(None),
        })
    }

    /// Device whose frames arrive through `frames`; each `read_frame` blocks
    /// until the test sends one.
    pub fn gated(sample_rate: u32, frame_length: usize, frames: Receiver<Vec<i16>>) -> Arc<Self> {
        Arc::new(Self {
            sample_rate,
            frame_length,
            opens: AtomicUsize::new(0),
            gate: Mutex::new(Some(frames)),
        })
    }
}

impl AudioDevice for ScriptedAudioDevice {
    fn open(&self) -> Result<Box<dyn AudioSource>, DeviceError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedAudioSource {
            sample_rate: self.sample_rate,
            frame_length: self.frame_length,
            gate: self.gate.lock().take(),
        }))
    }
}

/// Source handed out by `ScriptedAudioDevice`.
pub struct ScriptedAudioSource {
    sample_rate: u32,
    frame_length: usize,
    gate: Option<Receiver<Vec<i16>>>,
}

impl AudioSource for ScriptedAudioSource {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn frame_length(&self) -> usize {
        self.frame_length
    }

    fn read_frame(&mut self) -> Result<Vec<i16>, DeviceError> {
        match &self.gate {
            Some(frames) => frames
                .recv()
                .map_err(|_| DeviceError::new("frame stream closed")),
            None => Ok(vec![0; self.frame_length]),
        }
    }
}
