//! 骨骼节点

use glam::{Mat4, Quat, Vec3};

use crate::animation::SmoothedAngle;
use super::page_rotation;

/// 骨骼节点
#[derive(Clone, Debug)]
pub struct Bone {
    pub name: String,
    /// 父骨骼索引，-1 表示直接挂在页面组上
    pub parent_index: i32,

    // 相对于父骨骼的静止偏移（沿弯曲方向）
    pub bone_offset: Vec3,
    // 逆绑定矩阵（在 BoneChain::build_hierarchy 中计算）
    pub inverse_bind_matrix: Mat4,

    // 动画状态：主弯曲轴（Y）和折痕轴（X）
    pub bend: SmoothedAngle,
    pub fold: SmoothedAngle,

    // 变换结果（网格空间）
    pub local_transform: Mat4,
    pub global_transform: Mat4,
}

impl Bone {
    pub fn new(name: String) -> Self {
        Self {
            name,
            parent_index: -1,
            bone_offset: Vec3::ZERO,
            inverse_bind_matrix: Mat4::IDENTITY,
            bend: SmoothedAngle::default(),
            fold: SmoothedAngle::default(),
            local_transform: Mat4::IDENTITY,
            global_transform: Mat4::IDENTITY,
        }
    }

    /// 当前本地旋转
    pub fn rotation(&self) -> Quat {
        page_rotation(self.fold.value(), self.bend.value())
    }

    /// 重置动画状态（回到平直）
    pub fn reset_animation(&mut self) {
        self.bend.reset(0.0);
        self.fold.reset(0.0);
    }

    /// 更新本地变换：平移 = 静止偏移，旋转 = 折痕 * 弯曲
    pub fn update_local_transform(&mut self) {
        self.local_transform = Mat4::from_rotation_translation(self.rotation(), self.bone_offset);
    }

    /// 获取蒙皮矩阵 = 当前全局变换 * 逆绑定矩阵
    pub fn get_skinning_matrix(&self) -> Mat4 {
        self.global_transform * self.inverse_bind_matrix
    }
}

impl Default for Bone {
    fn default() -> Self {
        Self::new(String::new())
    }
}
