use anyhow::{Context, Result};

use super::{FrameGate, FramePermit, FrameRing};

/// Ring of per-frame slots plus the gate that keeps the CPU at most
/// `depth` frames ahead of the GPU.
///
/// Each frame:
/// 1. [`FramePipeline::begin_frame`] advances the cursor and blocks until a
///    unit of gate capacity is free,
/// 2. the caller rewrites the returned slot and submits GPU work,
/// 3. the [`FramePermit`] is dropped when that work completes.
///
/// Completions arrive in submission order on a single queue, so a free unit
/// means the oldest in-flight frame is done, and the oldest frame is the one
/// that last used the slot the cursor just moved onto.
#[derive(Debug)]
pub struct FramePipeline<S> {
    ring: FrameRing<S>,
    gate: FrameGate,
}

/// A slot that is safe to rewrite, plus the permit that must outlive the GPU
/// work reading it.
#[derive(Debug)]
pub struct FrameTicket<'a, S> {
    pub index: usize,
    pub slot: &'a mut S,
    pub permit: FramePermit,
}

impl<S> FramePipeline<S> {
    pub fn new(slots: Vec<S>) -> Result<Self> {
        let ring = FrameRing::new(slots).context("failed to build frame pipeline")?;
        let gate = FrameGate::new(ring.depth());
        Ok(Self { ring, gate })
    }

    pub fn from_fn(depth: usize, make: impl FnMut(usize) -> S) -> Result<Self> {
        Self::new((0..depth).map(make).collect())
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.ring.depth()
    }

    /// Index of the slot used by the most recent frame.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.ring.cursor()
    }

    #[inline]
    pub fn gate(&self) -> &FrameGate {
        &self.gate
    }

    pub fn slots(&self) -> impl Iterator<Item = &S> {
        self.ring.iter()
    }

    /// Advances to the next slot and blocks until it may be rewritten.
    pub fn begin_frame(&mut self) -> FrameTicket<'_, S> {
        let index = self.ring.advance();
        let permit = self.gate.acquire();
        self.ticket(index, permit)
    }

    /// Like [`FramePipeline::begin_frame`], calling `drive` while waiting so
    /// completions delivered by polling can make progress.
    pub fn begin_frame_driving(&mut self, drive: impl FnMut()) -> FrameTicket<'_, S> {
        let index = self.ring.advance();
        let permit = self.gate.acquire_driving(drive);
        self.ticket(index, permit)
    }

    /// Waits until no frame is in flight.
    pub fn drain(&self) {
        self.gate.drain();
    }

    pub fn drain_driving(&self, drive: impl FnMut()) {
        log::debug!(
            "draining frame pipeline ({} of {} in flight)",
            self.gate.in_flight(),
            self.depth()
        );
        self.gate.drain_driving(drive);
    }

    fn ticket(&mut self, index: usize, permit: FramePermit) -> FrameTicket<'_, S> {
        log::trace!("frame slot {index}/{} acquired", self.ring.depth());
        FrameTicket {
            index,
            slot: self.ring.current_mut(),
            permit,
        }
    }
}
