//! 顶点蒙皮计算

mod skinning;

pub use skinning::compute_skinning;

use glam::{Mat4, Vec3};

use crate::model::VertexInfluence;

/// 蒙皮输入数据
pub struct SkinningInput<'a> {
    /// 静止姿态顶点位置
    pub positions: &'a [Vec3],
    /// 静止姿态顶点法线
    pub normals: &'a [Vec3],
    /// 顶点骨骼影响
    pub influences: &'a [VertexInfluence],
    /// 骨骼变换矩阵（已乘以逆绑定矩阵）
    pub bone_matrices: &'a [Mat4],
}

/// 蒙皮输出数据
pub struct SkinningOutput {
    /// 变换后的顶点位置
    pub positions: Vec<Vec3>,
    /// 变换后的顶点法线
    pub normals: Vec<Vec3>,
}
