//! 动画系统
//!
//! 提供页面弯曲曲线、临界阻尼平滑、单页每帧动画和翻页步进状态机。

mod curve;
mod damp;
mod page_animator;
mod stepper;

pub use curve::{
    bone_target, fold_intensity, inside_curve, outside_curve, target_rotation, turning_intensity,
    turning_time, BoneTarget,
};
pub use damp::{delta_angle, lerp, SmoothedAngle};
pub use page_animator::{clamp_delta, PageAnimator, PageFrameInput, PageRuntimeState};
pub use stepper::{PageStepper, PendingStep};
