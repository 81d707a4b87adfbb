//! 页面薄板几何
//!
//! 长方体按六个面依次生成（+X, -X, +Y, -Y, +Z, -Z），每个面一个子网格，
//! 面的顺序即材质槽顺序。生成后整体沿 X 平移半个宽度，使书脊位于 x = 0。

use glam::{Vec2, Vec3};

use crate::config::BookConfig;
use crate::{FlipbookError, Result};

use super::{RuntimeVertex, SubMesh, VertexInfluence};

/// 所有页面共享的静态几何（只读）
#[derive(Clone, Debug)]
pub struct PageGeometry {
    pub vertices: Vec<RuntimeVertex>,
    pub indices: Vec<u32>,
    pub influences: Vec<VertexInfluence>,
    pub submeshes: Vec<SubMesh>,
    pub segments: usize,
    pub segment_width: f32,
    pub size: Vec3,
}

/// 单个面的生成参数
struct FacePlan {
    /// 面内横向、纵向和法线方向对应的坐标轴
    axes: [usize; 3],
    u_dir: f32,
    v_dir: f32,
    /// 面的宽、高和（带符号的）法线方向厚度
    extent: [f32; 3],
    grid: [usize; 2],
}

impl PageGeometry {
    /// 按配置构建薄板并计算蒙皮权重
    pub fn build(config: &BookConfig) -> Result<Self> {
        config.validate()?;

        let (w, h, d) = (config.page_width, config.page_height, config.page_depth);
        let (ws, hs) = (config.page_segments, config.height_segments);
        const X: usize = 0;
        const Y: usize = 1;
        const Z: usize = 2;

        let faces = [
            FacePlan { axes: [Z, Y, X], u_dir: -1.0, v_dir: -1.0, extent: [d, h, w], grid: [1, hs] },
            FacePlan { axes: [Z, Y, X], u_dir: 1.0, v_dir: -1.0, extent: [d, h, -w], grid: [1, hs] },
            FacePlan { axes: [X, Z, Y], u_dir: 1.0, v_dir: 1.0, extent: [w, d, h], grid: [ws, 1] },
            FacePlan { axes: [X, Z, Y], u_dir: 1.0, v_dir: -1.0, extent: [w, d, -h], grid: [ws, 1] },
            FacePlan { axes: [X, Y, Z], u_dir: 1.0, v_dir: -1.0, extent: [w, h, d], grid: [ws, hs] },
            FacePlan { axes: [X, Y, Z], u_dir: -1.0, v_dir: -1.0, extent: [w, h, -d], grid: [ws, hs] },
        ];

        let mut geometry = Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            influences: Vec::new(),
            submeshes: Vec::with_capacity(faces.len()),
            segments: ws,
            segment_width: config.segment_width(),
            size: Vec3::new(w, h, d),
        };

        for (slot, face) in faces.iter().enumerate() {
            geometry.push_face(face, slot);
        }

        // 书脊移到原点
        for vertex in &mut geometry.vertices {
            vertex.position.x += w / 2.0;
        }

        geometry.influences = geometry
            .vertices
            .iter()
            .map(|v| VertexInfluence::from_position(v.position.x, geometry.segment_width, ws))
            .collect();

        geometry.validate_influences(ws + 1)?;
        Ok(geometry)
    }

    fn push_face(&mut self, face: &FacePlan, slot: usize) {
        let [u, v, w] = face.axes;
        let [width, height, depth] = face.extent;
        let [grid_x, grid_y] = face.grid;

        let segment_w = width / grid_x as f32;
        let segment_h = height / grid_y as f32;
        let normal_sign = if depth > 0.0 { 1.0 } else { -1.0 };

        let base = self.vertices.len() as u32;
        let begin_index = self.indices.len() as u32;

        for iy in 0..=grid_y {
            let y = iy as f32 * segment_h - height / 2.0;
            for ix in 0..=grid_x {
                let x = ix as f32 * segment_w - width / 2.0;

                let mut position = [0.0f32; 3];
                position[u] = x * face.u_dir;
                position[v] = y * face.v_dir;
                position[w] = depth / 2.0;

                let mut normal = [0.0f32; 3];
                normal[w] = normal_sign;

                self.vertices.push(RuntimeVertex {
                    position: Vec3::from_array(position),
                    normal: Vec3::from_array(normal),
                    uv: Vec2::new(ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32),
                });
            }
        }

        let row = grid_x as u32 + 1;
        for iy in 0..grid_y as u32 {
            for ix in 0..grid_x as u32 {
                let a = base + ix + row * iy;
                let b = base + ix + row * (iy + 1);
                let c = base + ix + 1 + row * (iy + 1);
                let d = base + ix + 1 + row * iy;
                self.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        let index_count = self.indices.len() as u32 - begin_index;
        self.submeshes.push(SubMesh::new(begin_index, index_count, slot));
    }

    /// 所有影响骨骼都必须落在骨骼链内
    fn validate_influences(&self, bone_count: usize) -> Result<()> {
        let max_bone = self
            .influences
            .iter()
            .map(|inf| inf.bones[1])
            .max()
            .unwrap_or(0);
        if max_bone >= bone_count {
            return Err(FlipbookError::BoneCountMismatch {
                mesh: max_bone + 1,
                chain: bone_count,
            });
        }
        Ok(())
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 获取索引数量
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// 蒙皮需要的骨骼数量
    pub fn required_bone_count(&self) -> usize {
        self.segments + 1
    }

    pub fn rest_positions(&self) -> Vec<Vec3> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    pub fn rest_normals(&self) -> Vec<Vec3> {
        self.vertices.iter().map(|v| v.normal).collect()
    }
}
