use crate::scene::{NodeId, SceneGraph};
use crate::scenes::TigerRig;

/// Idle spin added to the tiger's yaw every tick, in radians
pub const IDLE_YAW_SPEED: f32 = 0.008;
/// Advance of the mouth phase per tick
pub const TIME_STEP: f64 = 0.045;
/// Hinge angle at a fully open mouth, in radians
pub const MAX_JAW_ANGLE: f32 = 0.85;
/// The tongue shows once the mouth is open past this amount
pub const TONGUE_THRESHOLD: f32 = 0.15;

/// Half-rectified sine: 0 through the negative half of each cycle
pub fn open_amount(t: f64) -> f32 {
    t.sin().max(0.0) as f32
}

pub fn tongue_visible(open: f32, threshold: f32) -> bool {
    open > threshold
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTuning {
    pub idle_yaw_speed: f32,
    pub time_step: f64,
    pub max_jaw_angle: f32,
    pub tongue_threshold: f32,
}

impl Default for AnimationTuning {
    fn default() -> Self {
        Self {
            idle_yaw_speed: IDLE_YAW_SPEED,
            time_step: TIME_STEP,
            max_jaw_angle: MAX_JAW_ANGLE,
            tongue_threshold: TONGUE_THRESHOLD,
        }
    }
}

/// Mouth phase accumulator; only [`AnimationLoop`] advances it
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub t: f64,
}

/// What a tick wrote into the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub open: f32,
    pub jaw_angle: f32,
    pub tongue_visible: bool,
}

/// Per-frame idle spin and mouth flap
#[derive(Debug, Clone)]
pub struct AnimationLoop {
    state: AnimationState,
    tuning: AnimationTuning,
    root: NodeId,
    jaw_hinge: NodeId,
    tongue: NodeId,
}

impl AnimationLoop {
    pub fn new(rig: &TigerRig, tuning: AnimationTuning) -> Self {
        Self {
            state: AnimationState::default(),
            tuning,
            root: rig.root,
            jaw_hinge: rig.jaw_hinge,
            tongue: rig.tongue,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Spin, advance the phase, then pose the jaw and tongue for it
    pub fn tick(&mut self, scene: &mut SceneGraph) -> TickOutcome {
        scene.node_mut(self.root).rotation.y += self.tuning.idle_yaw_speed;

        self.state.t += self.tuning.time_step;
        let open = open_amount(self.state.t);
        let jaw_angle = open * self.tuning.max_jaw_angle;
        let show_tongue = tongue_visible(open, self.tuning.tongue_threshold);

        scene.node_mut(self.jaw_hinge).rotation.x = jaw_angle;
        scene.node_mut(self.tongue).visible = show_tongue;

        TickOutcome {
            open,
            jaw_angle,
            tongue_visible: show_tongue,
        }
    }
}
