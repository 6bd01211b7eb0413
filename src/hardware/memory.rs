//! Variable-partition memory: first-fit placement over ordered gaps.

use std::collections::VecDeque;

use crate::os::job::JobRef;
use crate::os::segment::Segment;

/// Fixed-size memory with a resident-segment map sorted by ascending
/// position and a FIFO queue of jobs whose segment lists did not fit.
pub struct Memory {
    total_size: u64,
    relocating_time: f64,
    resident: Vec<Segment>,
    queue: VecDeque<JobRef>,
}

impl Memory {
    pub fn new(total_size: u64, relocating_time: f64) -> Self {
        Self {
            total_size,
            relocating_time,
            resident: Vec::new(),
            queue: VecDeque::new(),
        }
    }

    /// Delay between a successful allocation and the job becoming
    /// runnable.
    pub fn relocating_time(&self) -> f64 {
        self.relocating_time
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Resident segments in ascending-position order.
    pub fn resident_segments(&self) -> &[Segment] {
        &self.resident
    }

    /// Sum of all resident segment sizes.
    pub fn used(&self) -> u64 {
        self.resident.iter().map(Segment::size).sum()
    }

    /// First-fit scan from `start`: returns the lowest position at or
    /// after `start` where a `size`-unit region fits between resident
    /// segments, or `None` when only the exhausted tail remains. The
    /// tail bound is strict: a region may not touch the very end of
    /// memory.
    pub fn find_free_region(&self, start: u64, size: u64) -> Option<u64> {
        let mut position = start;
        for segment in &self.resident {
            if position + size <= segment.position() {
                return Some(position);
            }
            if segment.position() + segment.size() > position {
                position = segment.position() + segment.size();
            }
        }
        if position + size < self.total_size {
            Some(position)
        } else {
            None
        }
    }

    /// Places a job's full segment list, all or nothing.
    ///
    /// The first segment is probed from position 0; each subsequent one
    /// from the end of the previous segment's computed placement, so the
    /// list lands as contiguously as the existing gaps allow. If any
    /// probe fails the resident map is left untouched and `false` is
    /// returned; only when every probe succeeds are the segments marked
    /// real and committed.
    pub fn allocate(&mut self, segments: &mut [Segment]) -> bool {
        let mut positions: Vec<u64> = Vec::with_capacity(segments.len());
        for (index, segment) in segments.iter().enumerate() {
            let start = if index == 0 {
                0
            } else {
                positions[index - 1] + segments[index - 1].size()
            };
            match self.find_free_region(start, segment.size()) {
                Some(position) => positions.push(position),
                None => return false,
            }
        }

        for (segment, position) in segments.iter_mut().zip(positions) {
            segment.place(position);
            let index = self
                .resident
                .iter()
                .position(|resident| resident.position() > position)
                .unwrap_or(self.resident.len());
            self.resident.insert(index, *segment);
        }
        true
    }

    /// Removes each segment from the resident map by region equality and
    /// marks it virtual again.
    pub fn release(&mut self, segments: &mut [Segment]) {
        for segment in segments.iter_mut() {
            if let Some(index) = self.resident.iter().position(|resident| *resident == *segment) {
                self.resident.remove(index);
            }
            segment.evict();
        }
    }

    pub fn has_empty_queue(&self) -> bool {
        self.queue.is_empty()
    }

    /// The job at the front of the wait queue, without dequeuing it.
    pub fn peek_queue(&self) -> Option<JobRef> {
        self.queue.front().copied()
    }

    pub fn enqueue(&mut self, job: JobRef) {
        self.queue.push_back(job);
    }

    pub fn dequeue(&mut self) -> Option<JobRef> {
        self.queue.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(sizes: &[u64], job_id: u32) -> Vec<Segment> {
        sizes.iter().map(|&s| Segment::new(s, job_id)).collect()
    }

    #[test]
    fn empty_memory_places_at_start() {
        let memory = Memory::new(256, 20.0);
        assert_eq!(memory.find_free_region(0, 50), Some(0));
        assert_eq!(memory.find_free_region(30, 50), Some(30));
    }

    #[test]
    fn tail_bound_is_strict() {
        let memory = Memory::new(256, 20.0);
        assert_eq!(memory.find_free_region(0, 256), None);
        assert_eq!(memory.find_free_region(0, 255), Some(0));
    }

    #[test]
    fn first_fit_skips_occupied_regions() {
        let mut memory = Memory::new(256, 20.0);
        let mut first = segments(&[100], 1);
        assert!(memory.allocate(&mut first));
        assert_eq!(first[0].position(), 0);

        // [0, 100) is taken, so a 50-unit region lands at 100.
        assert_eq!(memory.find_free_region(0, 50), Some(100));
        let mut second = segments(&[50], 2);
        assert!(memory.allocate(&mut second));
        assert_eq!(second[0].position(), 100);
    }

    #[test]
    fn gap_between_segments_is_found() {
        let mut memory = Memory::new(256, 20.0);
        let mut a = segments(&[50], 1);
        let mut b = segments(&[50], 2);
        let mut c = segments(&[50], 3);
        assert!(memory.allocate(&mut a));
        assert!(memory.allocate(&mut b));
        assert!(memory.allocate(&mut c));
        // Free the middle segment; the next fit of 40 takes its gap.
        memory.release(&mut b);
        assert_eq!(memory.find_free_region(0, 40), Some(50));
        assert_eq!(memory.find_free_region(0, 60), Some(150));
    }

    #[test]
    fn multi_segment_allocation_is_atomic() {
        let mut memory = Memory::new(256, 20.0);
        let mut resident = segments(&[100], 1);
        assert!(memory.allocate(&mut resident));
        let before: Vec<(u64, u64)> = memory
            .resident_segments()
            .iter()
            .map(|s| (s.position(), s.size()))
            .collect();

        // Second segment cannot fit anywhere past the first's placement.
        let mut oversized = segments(&[100, 100], 2);
        assert!(!memory.allocate(&mut oversized));

        let after: Vec<(u64, u64)> = memory
            .resident_segments()
            .iter()
            .map(|s| (s.position(), s.size()))
            .collect();
        assert_eq!(before, after);
        assert!(oversized.iter().all(|s| !s.is_allocated()));
    }

    #[test]
    fn allocate_release_round_trips() {
        let mut memory = Memory::new(256, 20.0);
        let mut anchor = segments(&[30], 1);
        assert!(memory.allocate(&mut anchor));

        let mut list = segments(&[40, 60], 2);
        assert!(memory.allocate(&mut list));
        assert!(list.iter().all(Segment::is_allocated));
        assert_eq!(memory.used(), 130);

        memory.release(&mut list);
        assert!(list.iter().all(|s| !s.is_allocated()));
        assert_eq!(memory.resident_segments().len(), 1);
        assert_eq!(memory.used(), 30);
    }

    #[test]
    fn resident_map_stays_sorted_and_disjoint() {
        let mut memory = Memory::new(256, 20.0);
        let mut a = segments(&[60], 1);
        let mut b = segments(&[20, 30], 2);
        let mut c = segments(&[40], 3);
        assert!(memory.allocate(&mut a));
        assert!(memory.allocate(&mut b));
        assert!(memory.allocate(&mut c));

        let map = memory.resident_segments();
        for pair in map.windows(2) {
            assert!(pair[0].position() + pair[0].size() <= pair[1].position());
        }
        assert!(memory.used() <= memory.total_size());
    }

    #[test]
    fn queue_is_fifo() {
        let mut memory = Memory::new(256, 20.0);
        memory.enqueue(JobRef(3));
        memory.enqueue(JobRef(4));
        assert_eq!(memory.peek_queue(), Some(JobRef(3)));
        assert_eq!(memory.dequeue(), Some(JobRef(3)));
        assert_eq!(memory.dequeue(), Some(JobRef(4)));
        assert!(memory.has_empty_queue());
    }
}
