//! Reconstruction of the intra-tick animation timeline.
//!
//! Each actor touched during a tick keeps a queue of post-action snapshots.
//! Frame `k` takes the `k`-th snapshot of every actor that has one, so
//! independent actors animate in parallel while each actor's own changes
//! stay in order.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::FramePadding;
use crate::state::{Actor, ActorId, ActorMap, AnimationStyle, Frame};

#[derive(Clone, Debug)]
struct Step {
    /// `None` records a removal.
    snapshot: Option<Arc<Actor>>,
    style: AnimationStyle,
}

/// Per-actor snapshot queues for one tick.
#[derive(Clone, Debug, Default)]
pub struct FrameAccumulator {
    queues: BTreeMap<ActorId, Vec<Step>>,
}

impl FrameAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the state of `id` after an action; `None` means it was removed.
    ///
    /// A `skip` step folds into the actor's previous pending step.
    pub fn push(&mut self, id: ActorId, snapshot: Option<Arc<Actor>>, style: AnimationStyle) {
        let queue = self.queues.entry(id).or_default();
        match queue.last_mut() {
            Some(previous) if style == AnimationStyle::Skip => previous.snapshot = snapshot,
            _ => queue.push(Step { snapshot, style }),
        }
    }

    /// Number of frames [`FrameAccumulator::frames`] will produce.
    fn step_count(&self) -> usize {
        self.queues.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Interleaves the queues into frames, starting from the actors as they
    /// were before the tick.
    pub fn frames(&self, start: &ActorMap, padding: FramePadding) -> Vec<Frame> {
        let mut current = start.clone();
        (0..self.step_count())
            .map(|index| {
                let mut frame = Frame {
                    id: u32::try_from(index).unwrap_or(u32::MAX),
                    ..Frame::default()
                };
                for (id, queue) in &self.queues {
                    let Some(step) = queue.get(index) else {
                        continue;
                    };
                    frame.animation_styles.insert(*id, step.style);
                    match &step.snapshot {
                        Some(actor) => {
                            current.insert(*id, Arc::clone(actor));
                            if padding == FramePadding::Sparse {
                                frame.actors.insert(*id, Arc::clone(actor));
                            }
                        }
                        None => {
                            current.remove(id);
                            frame.removed.push(*id);
                        }
                    }
                }
                if padding == FramePadding::HoldLast {
                    frame.actors = current.clone();
                }
                frame
            })
            .collect()
    }
}
