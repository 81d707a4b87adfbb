//! 页面贴图加载和管理

mod library;
mod loader;

pub use library::SurfaceLibrary;
pub use loader::{load_texture, load_texture_from_memory};

/// 纹理数据
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub has_alpha: bool,
}

impl Texture {
    pub fn new(width: u32, height: u32, data: Vec<u8>, has_alpha: bool) -> Self {
        Self { width, height, data, has_alpha }
    }

    /// 1x1 白色占位图，贴图缺失时代替真实图片
    pub fn placeholder() -> Self {
        Self::new(1, 1, vec![255, 255, 255], false)
    }

    /// 获取纹理字节数
    pub fn byte_count(&self) -> usize {
        self.data.len()
    }

    /// 检查是否包含透明通道
    pub fn has_transparency(&self) -> bool {
        self.has_alpha
    }
}
