use anyhow::{ensure, Result};

/// Fixed set of per-frame slots cycled round-robin.
///
/// The cursor starts at slot 0 and [`FrameRing::advance`] moves it before a
/// frame is recorded, so the first frame lands in slot 1 (or 0 for depth 1).
#[derive(Debug)]
pub struct FrameRing<T> {
    slots: Vec<T>,
    cursor: usize,
}

impl<T> FrameRing<T> {
    pub fn new(slots: Vec<T>) -> Result<Self> {
        ensure!(!slots.is_empty(), "frame ring needs at least one slot");
        Ok(Self { slots, cursor: 0 })
    }

    /// Builds `depth` slots with `make(index)`.
    pub fn from_fn(depth: usize, make: impl FnMut(usize) -> T) -> Result<Self> {
        Self::new((0..depth).map(make).collect())
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves to the next slot and returns its index.
    #[inline]
    pub fn advance(&mut self) -> usize {
        self.cursor = (self.cursor + 1) % self.slots.len();
        self.cursor
    }

    #[inline]
    pub fn current(&self) -> &T {
        &self.slots[self.cursor]
    }

    #[inline]
    pub fn current_mut(&mut self) -> &mut T {
        &mut self.slots[self.cursor]
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_depth_is_rejected() {
        assert!(FrameRing::<u8>::new(Vec::new()).is_err());
        assert!(FrameRing::from_fn(0, |i| i).is_err());
    }

    #[test]
    fn advance_wraps_modulo_depth() {
        let mut ring = FrameRing::from_fn(3, |i| i * 10).expect("ring");
        assert_eq!(ring.cursor(), 0);
        let seen: Vec<usize> = (0..7).map(|_| ring.advance()).collect();
        assert_eq!(seen, [1, 2, 0, 1, 2, 0, 1]);
        assert_eq!(*ring.current(), 10);
    }

    #[test]
    fn single_slot_ring_stays_put() {
        let mut ring = FrameRing::new(vec!['a']).expect("ring");
        assert_eq!(ring.advance(), 0);
        assert_eq!(ring.advance(), 0);
    }

    #[test]
    fn current_mut_targets_cursor_slot() {
        let mut ring = FrameRing::new(vec![0u32; 2]).expect("ring");
        ring.advance();
        *ring.current_mut() = 7;
        assert_eq!(ring.get(1), Some(&7));
        assert_eq!(ring.get(0), Some(&0));
        assert_eq!(ring.get(2), None);
        assert_eq!(ring.iter().count(), 2);
    }
}
