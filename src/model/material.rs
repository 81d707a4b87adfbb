//! 页面材质定义

use std::sync::Arc;

use glam::Vec3;

use crate::texture::Texture;

/// 正面（+Z）材质槽
pub const FRONT_FACE_SLOT: usize = 4;
/// 背面（-Z）材质槽
pub const BACK_FACE_SLOT: usize = 5;

/// 页面材质
#[derive(Clone, Debug)]
pub struct PageMaterial {
    pub name: String,
    pub color: Vec3,
    pub map: Option<Arc<Texture>>,
    pub roughness: f32,
    pub roughness_map: Option<Arc<Texture>>,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
}

impl PageMaterial {
    /// 白色纸边
    pub fn edge(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// 带图片和高亮通道的正/背面
    ///
    /// 封面材质使用粗糙度贴图，内页使用固定粗糙度。
    pub fn surface(
        name: impl Into<String>,
        map: Arc<Texture>,
        roughness_map: Option<Arc<Texture>>,
        roughness: f32,
    ) -> Self {
        Self {
            name: name.into(),
            map: Some(map),
            roughness: if roughness_map.is_some() { 1.0 } else { roughness },
            roughness_map,
            emissive: Self::highlight_color(),
            ..Self::default()
        }
    }

    /// 悬停高亮颜色（橙色）
    pub fn highlight_color() -> Vec3 {
        Vec3::new(1.0, 0.647, 0.0)
    }

    /// 是否带自发光高亮通道
    pub fn has_highlight(&self) -> bool {
        self.emissive != Vec3::ZERO
    }
}

impl Default for PageMaterial {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: Vec3::ONE,
            map: None,
            roughness: 1.0,
            roughness_map: None,
            emissive: Vec3::ZERO,
            emissive_intensity: 0.0,
        }
    }
}
