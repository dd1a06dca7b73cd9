//! CRC32 fingerprints of rendered output
//!
//! Used to confirm that a configuration renders the same bytes across
//! runs and thread counts.

use crc32fast::Hasher;

use crate::render::{Frame, FrameSequence};

/// CRC over a frame's dimensions and pixels
pub fn frame_crc32(frame: &Frame) -> u32 {
    let mut hasher = Hasher::new();
    update_frame(&mut hasher, frame);
    hasher.finalize()
}

/// CRC over every frame of a sequence, in order
pub fn sequence_crc32(sequence: &FrameSequence) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&(sequence.len() as u64).to_le_bytes());
    for frame in sequence {
        update_frame(&mut hasher, frame);
    }
    hasher.finalize()
}

fn update_frame(hasher: &mut Hasher, frame: &Frame) {
    hasher.update(&(frame.width() as u64).to_le_bytes());
    hasher.update(&(frame.height() as u64).to_le_bytes());
    hasher.update(frame.pixels());
}
