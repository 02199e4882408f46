use strum::{AsRefStr, Display, EnumString};

/// Shape of the frames reconstructed for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Display, EnumString, AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum FramePadding {
    /// Every frame is a full grid; actors with fewer steps hold their last
    /// snapshot.
    #[default]
    HoldLast,
    /// Frames only carry the actors that changed at that step.
    Sparse,
}

/// Engine tunables and their defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Base seed mixed into every random draw (random flow groups).
    pub seed: u64,
    /// Number of undo snapshots kept on the world.
    pub max_history: usize,
    /// Upper bound on the resolved iteration count of a loop group.
    pub max_loop_iterations: u32,
    pub frame_padding: FramePadding,
    /// Whether `evaluatedTickFrames` is populated at all.
    pub record_frames: bool,
}

impl EngineConfig {
    pub const DEFAULT_SEED: u64 = 0;
    pub const DEFAULT_MAX_HISTORY: usize = 64;
    pub const DEFAULT_MAX_LOOP_ITERATIONS: u32 = 64;

    pub fn new() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            max_history: Self::DEFAULT_MAX_HISTORY,
            max_loop_iterations: Self::DEFAULT_MAX_LOOP_ITERATIONS,
            frame_padding: FramePadding::default(),
            record_frames: true,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_frame_padding(mut self, frame_padding: FramePadding) -> Self {
        self.frame_padding = frame_padding;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
