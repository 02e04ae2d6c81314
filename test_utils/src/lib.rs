//! Utility helpers for tendril tests.
//!
//! [`BallMap`] stands in for a host's ball registry and
//! [`RecordingPresentation`] captures the calls a tendril makes on its scene
//! node so tests can assert on the protocol.

use glam::Vec2;
use hashbrown::HashMap;
use magic_tendril::{BallRegistry, Presentation, TendrilPose};

/// In-memory ball registry keyed by small integer handles.
#[derive(Debug, Clone, Default)]
pub struct BallMap {
    balls: HashMap<u32, Vec2>,
}

impl BallMap {
    /// Builds a registry from `(handle, x, y)` triples.
    pub fn with(entries: &[(u32, f32, f32)]) -> Self {
        let balls = entries
            .iter()
            .map(|&(id, x, y)| (id, Vec2::new(x, y)))
            .collect();
        Self { balls }
    }

    pub fn place(&mut self, id: u32, position: Vec2) {
        self.balls.insert(id, position);
    }

    pub fn remove(&mut self, id: u32) {
        self.balls.remove(&id);
    }
}

impl BallRegistry<u32> for BallMap {
    fn position_of(&self, ball: u32) -> Option<Vec2> {
        self.balls.get(&ball).copied()
    }
}

/// One call received by a [`RecordingPresentation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PresentationCall {
    Attach(&'static str, TendrilPose),
    Redraw(TendrilPose),
    Detach,
}

/// Presentation that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresentation {
    pub calls: Vec<PresentationCall>,
}

impl RecordingPresentation {
    pub fn attach_count(&self) -> usize {
        self.count(|call| matches!(call, PresentationCall::Attach(..)))
    }

    pub fn redraw_count(&self) -> usize {
        self.count(|call| matches!(call, PresentationCall::Redraw(_)))
    }

    pub fn detach_count(&self) -> usize {
        self.count(|call| matches!(call, PresentationCall::Detach))
    }

    /// Most recent pose drawn, from either attach or redraw.
    pub fn last_pose(&self) -> Option<TendrilPose> {
        self.calls.iter().rev().find_map(|call| match call {
            PresentationCall::Attach(_, pose) | PresentationCall::Redraw(pose) => Some(*pose),
            PresentationCall::Detach => None,
        })
    }

    fn count(&self, pred: impl Fn(&PresentationCall) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }
}

impl Presentation for RecordingPresentation {
    fn attach(&mut self, label: &'static str, pose: TendrilPose) {
        self.calls.push(PresentationCall::Attach(label, pose));
    }

    fn redraw(&mut self, pose: TendrilPose) {
        self.calls.push(PresentationCall::Redraw(pose));
    }

    fn detach(&mut self) {
        self.calls.push(PresentationCall::Detach);
    }
}
