//! 页面蒙皮网格

use std::sync::Arc;

use glam::Mat4;

use crate::config::BookConfig;
use crate::skeleton::BoneChain;
use crate::skinning::{compute_skinning, SkinningInput, SkinningOutput};
use crate::texture::Texture;
use crate::{FlipbookError, Result};

use super::{PageGeometry, PageMaterial, BACK_FACE_SLOT, FRONT_FACE_SLOT};

/// 单页使用的贴图
#[derive(Clone, Debug)]
pub struct PageSurfaces {
    pub front: Arc<Texture>,
    pub back: Arc<Texture>,
    /// 封面/封底粗糙度贴图，内页为 None
    pub roughness: Option<Arc<Texture>>,
}

/// 绑定到骨骼链的页面网格，每个页面槽位构建一次
pub struct PageMesh {
    pub number: usize,
    pub geometry: Arc<PageGeometry>,
    pub skeleton: BoneChain,
    pub materials: Vec<PageMaterial>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    /// 骨骼形变后静态包围盒不可信，始终关闭视锥剔除
    pub frustum_culled: bool,
}

impl PageMesh {
    /// 构建第 `number` 页的网格
    ///
    /// 第一页正面和最后一页背面使用粗糙度贴图。
    pub fn build(
        number: usize,
        page_count: usize,
        geometry: Arc<PageGeometry>,
        surfaces: PageSurfaces,
        config: &BookConfig,
    ) -> Result<Self> {
        let skeleton = BoneChain::new(geometry.segments, geometry.segment_width);
        if skeleton.bone_count() != geometry.required_bone_count() {
            return Err(FlipbookError::BoneCountMismatch {
                mesh: geometry.required_bone_count(),
                chain: skeleton.bone_count(),
            });
        }

        let front_roughness = if number == 0 { surfaces.roughness.clone() } else { None };
        let back_roughness = if number + 1 == page_count { surfaces.roughness.clone() } else { None };

        let mut materials: Vec<PageMaterial> = ["edge_px", "edge_nx", "edge_py", "edge_ny"]
            .into_iter()
            .map(PageMaterial::edge)
            .collect();
        materials.push(PageMaterial::surface(
            format!("page_{}_front", number),
            surfaces.front,
            front_roughness,
            config.interior_roughness,
        ));
        materials.push(PageMaterial::surface(
            format!("page_{}_back", number),
            surfaces.back,
            back_roughness,
            config.interior_roughness,
        ));

        Ok(Self {
            number,
            geometry,
            skeleton,
            materials,
            cast_shadow: true,
            receive_shadow: true,
            frustum_culled: false,
        })
    }

    /// 设置正反两面的高亮强度
    pub fn set_emissive_intensity(&mut self, intensity: f32) {
        for slot in [FRONT_FACE_SLOT, BACK_FACE_SLOT] {
            if let Some(material) = self.materials.get_mut(slot) {
                material.emissive_intensity = intensity;
            }
        }
    }

    /// 当前高亮强度
    pub fn emissive_intensity(&self) -> f32 {
        self.materials
            .get(FRONT_FACE_SLOT)
            .map(|m| m.emissive_intensity)
            .unwrap_or(0.0)
    }

    /// 当前蒙皮矩阵
    pub fn skinning_matrices(&self) -> &[Mat4] {
        self.skeleton.get_skinning_matrices()
    }

    /// 以当前骨骼姿态计算形变后的顶点（网格空间）
    pub fn skin(&self) -> SkinningOutput {
        let positions = self.geometry.rest_positions();
        let normals = self.geometry.rest_normals();
        compute_skinning(&SkinningInput {
            positions: &positions,
            normals: &normals,
            influences: &self.geometry.influences,
            bone_matrices: self.skeleton.get_skinning_matrices(),
        })
    }
}
