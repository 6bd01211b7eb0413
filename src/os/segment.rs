//! Memory segments: one contiguous region requested by a job.

/// Allocation state of a segment.
///
/// A segment starts out `Virtual` (requested, not resident) and becomes
/// `Real` once the memory manager places it at a concrete position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentState {
    Virtual,
    Real,
}

/// One contiguous memory region belonging to a job.
///
/// The position is only meaningful while the segment is `Real`; releasing
/// the segment resets it to zero.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    size: u64,
    job_id: u32,
    state: SegmentState,
    position: u64,
}

impl Segment {
    pub fn new(size: u64, job_id: u32) -> Self {
        Self {
            size,
            job_id,
            state: SegmentState::Virtual,
            position: 0,
        }
    }

    pub fn is_allocated(&self) -> bool {
        self.state == SegmentState::Real
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn job_id(&self) -> u32 {
        self.job_id
    }

    /// Marks the segment resident at `position`.
    pub(crate) fn place(&mut self, position: u64) {
        self.state = SegmentState::Real;
        self.position = position;
    }

    /// Marks the segment virtual again and forgets its position.
    pub(crate) fn evict(&mut self) {
        self.state = SegmentState::Virtual;
        self.position = 0;
    }
}

/// Two segments are the same region iff their position and size match.
impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.size == other.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_virtual_at_zero() {
        let segment = Segment::new(40, 7);
        assert!(!segment.is_allocated());
        assert_eq!(segment.position(), 0);
        assert_eq!(segment.size(), 40);
        assert_eq!(segment.job_id(), 7);
    }

    #[test]
    fn place_and_evict_round_trip() {
        let mut segment = Segment::new(40, 7);
        segment.place(128);
        assert!(segment.is_allocated());
        assert_eq!(segment.position(), 128);
        segment.evict();
        assert!(!segment.is_allocated());
        assert_eq!(segment.position(), 0);
    }

    #[test]
    fn equality_is_position_and_size_only() {
        let mut a = Segment::new(40, 1);
        let mut b = Segment::new(40, 2);
        a.place(64);
        b.place(64);
        assert_eq!(a, b);
        b.place(65);
        assert_ne!(a, b);
    }
}
