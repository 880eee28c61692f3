use float_pretty_print::PrettyPrintFloat;

/// A source of frame timestamps, in milliseconds.
///
/// The window's render loop is the real source; tests script their own.
pub trait FrameSource {
    /// Returns the next frame's timestamp, or `None` once the source is done.
    fn next_frame(&mut self) -> Option<f64>;
}

impl<I> FrameSource for I
where
    I: Iterator<Item = f64>,
{
    fn next_frame(&mut self) -> Option<f64> {
        self.next()
    }
}

/// Frames at a fixed rate, starting at `t = 0`.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedRateFrames {
    interval_ms: f64,
    next_index: u64,
    count: u64,
}

impl FixedRateFrames {
    pub fn new(frames_per_second: f64, count: u64) -> Self {
        Self {
            interval_ms: 1000.0 / frames_per_second,
            next_index: 0,
            count,
        }
    }

    /// Starts the sequence at frame `index` instead of zero.
    pub fn starting_at(mut self, index: u64) -> Self {
        self.count = self.count.saturating_add(index);
        self.next_index = index;
        self
    }
}

impl Iterator for FixedRateFrames {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next_index >= self.count {
            return None;
        }
        let timestamp = self.next_index as f64 * self.interval_ms;
        self.next_index += 1;
        Some(timestamp)
    }
}

/// Formats simulation seconds for the clock readout, e.g. `   12.35 s`.
pub(crate) fn format_clock(seconds: f64) -> String {
    format!("{:8.8} s", PrettyPrintFloat(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_rate_frames() {
        let frames: Vec<f64> = FixedRateFrames::new(4.0, 3).collect();
        assert_eq!(frames, [0.0, 250.0, 500.0]);
    }

    #[test]
    fn fixed_rate_frames_with_offset() {
        let mut source = FixedRateFrames::new(10.0, 2).starting_at(5);
        assert_eq!(source.next_frame(), Some(500.0));
        assert_eq!(source.next_frame(), Some(600.0));
        assert_eq!(source.next_frame(), None);
    }

    #[test]
    fn iterators_are_frame_sources() {
        let mut source = [16.0, 33.0].into_iter();
        assert_eq!(FrameSource::next_frame(&mut source), Some(16.0));
        assert_eq!(FrameSource::next_frame(&mut source), Some(33.0));
        assert_eq!(FrameSource::next_frame(&mut source), None);
    }
}
