//! Sample buffering for live, chunked input

/// Accumulates arbitrarily sized chunks and hands out overlapping frames
#[derive(Debug, Default)]
pub struct SampleBuffer {
    /// Buffered samples not yet consumed
    data: Vec<f32>,
    /// Start of the next frame within `data`
    position: usize,
}

impl SampleBuffer {
    /// Create a new sample buffer
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            position: 0,
        }
    }

    /// Add samples to buffer
    pub fn push(&mut self, samples: &[f32]) {
        self.data.extend_from_slice(samples);
    }

    /// Samples available from the current position
    pub fn available(&self) -> usize {
        self.data.len() - self.position
    }

    /// Copy out the next frame of `frame_size` samples and advance by `hop_size`
    ///
    /// Returns `None` until enough samples are buffered. Consumed samples are
    /// compacted away so the buffer does not grow without bound on long
    /// streams.
    pub fn next_frame(&mut self, frame_size: usize, hop_size: usize) -> Option<Vec<f32>> {
        if frame_size == 0 || self.available() < frame_size {
            return None;
        }

        let frame = self.data[self.position..self.position + frame_size].to_vec();
        self.position += hop_size.max(1).min(self.available());

        if self.position >= frame_size {
            self.data.drain(..self.position);
            self.position = 0;
        }

        Some(frame)
    }

    /// Drop all buffered samples
    pub fn clear(&mut self) {
        self.data.clear();
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_overlap_by_hop() {
        let mut buffer = SampleBuffer::new(16);
        buffer.push(&[0.0, 1.0, 2.0]);
        assert!(buffer.next_frame(4, 2).is_none());

        buffer.push(&[3.0, 4.0, 5.0]);
        assert_eq!(buffer.next_frame(4, 2), Some(vec![0.0, 1.0, 2.0, 3.0]));
        assert_eq!(buffer.next_frame(4, 2), Some(vec![2.0, 3.0, 4.0, 5.0]));
        assert!(buffer.next_frame(4, 2).is_none());
        assert_eq!(buffer.available(), 2);
    }

    #[test]
    fn test_clear() {
        let mut buffer = SampleBuffer::new(4);
        buffer.push(&[1.0; 8]);
        buffer.clear();
        assert_eq!(buffer.available(), 0);
        assert!(buffer.next_frame(1, 1).is_none());
    }
}
