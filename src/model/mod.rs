//! 页面网格：薄板几何、蒙皮权重、材质和骨骼绑定

mod geometry;
mod material;
mod page_mesh;
mod submesh;

pub use geometry::PageGeometry;
pub use material::{PageMaterial, BACK_FACE_SLOT, FRONT_FACE_SLOT};
pub use page_mesh::{PageMesh, PageSurfaces};
pub use submesh::SubMesh;

use glam::{Vec2, Vec3};

/// 静止姿态顶点数据
#[derive(Clone, Debug)]
pub struct RuntimeVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// 顶点骨骼影响：相邻两根骨骼的线性混合
///
/// `bones[0]` 权重为 `1 - weight`，`bones[1]` 权重为 `weight`。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexInfluence {
    pub bones: [usize; 2],
    pub weight: f32,
}

impl VertexInfluence {
    /// 按顶点沿弯曲方向的静止坐标计算影响
    ///
    /// 骨骼索引截断到 `[0, segments-1]`，因此 `bones[1]` 最大为 `segments`。
    pub fn from_position(x: f32, segment_width: f32, segments: usize) -> Self {
        let last = segments.saturating_sub(1);
        let scaled = (x / segment_width).max(0.0);
        let index = (scaled.floor() as usize).min(last);
        let weight = (scaled - index as f32).clamp(0.0, 1.0);
        Self {
            bones: [index, index + 1],
            weight,
        }
    }

    /// 两根骨骼各自的权重
    pub fn weights(&self) -> [f32; 2] {
        [1.0 - self.weight, self.weight]
    }
}

impl Default for VertexInfluence {
    fn default() -> Self {
        Self { bones: [0, 1], weight: 0.0 }
    }
}
