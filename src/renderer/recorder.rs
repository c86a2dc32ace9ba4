//! Headless presenters
//!
//! `FrameRecorder` keeps every offset it is handed, which is what tests
//! want. `LastOffset` keeps only the newest one, so a headless run of any
//! length uses constant memory.

use std::convert::Infallible;

use glam::Vec2;

use super::Present;

#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    pub offsets: Vec<Vec2>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn last(&self) -> Option<Vec2> {
        self.offsets.last().copied()
    }
}

impl Present for FrameRecorder {
    type Error = Infallible;

    fn present(&mut self, offset: Vec2) -> Result<(), Self::Error> {
        self.offsets.push(offset);
        Ok(())
    }
}

/// Presenter that remembers the latest offset and a frame count
#[derive(Debug, Clone, Copy, Default)]
pub struct LastOffset {
    last: Option<Vec2>,
    presented: u64,
}

impl LastOffset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<Vec2> {
        self.last
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Present for LastOffset {
    type Error = Infallible;

    fn present(&mut self, offset: Vec2) -> Result<(), Self::Error> {
        self.last = Some(offset);
        self.presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut rec = FrameRecorder::new();
        assert!(rec.is_empty());
        rec.present(Vec2::new(0.1, 0.2)).unwrap();
        rec.present(Vec2::new(0.3, 0.4)).unwrap();
        assert_eq!(rec.len(), 2);
        assert_eq!(rec.offsets[0], Vec2::new(0.1, 0.2));
        assert_eq!(rec.last(), Some(Vec2::new(0.3, 0.4)));
    }

    #[test]
    fn test_last_offset_overwrites() {
        let mut last = LastOffset::new();
        assert_eq!(last.last(), None);
        for i in 0..10_000 {
            last.present(Vec2::new(i as f32, 0.0)).unwrap();
        }
        assert_eq!(last.presented(), 10_000);
        assert_eq!(last.last(), Some(Vec2::new(9_999.0, 0.0)));
    }
}
