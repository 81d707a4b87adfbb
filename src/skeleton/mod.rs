//! 页面骨骼链

mod bone;
mod chain;

pub use bone::Bone;
pub use chain::BoneChain;

use glam::{EulerRot, Quat};

/// 由折痕角（X 轴）和弯曲角（Y 轴）组合旋转，欧拉顺序 XYZ
pub fn page_rotation(fold: f32, bend: f32) -> Quat {
    Quat::from_euler(EulerRot::XYZ, fold, bend, 0.0)
}
