//! 纹理加载
//!
//! - 垂直翻转图像（纹理坐标原点在左下角）
//! - 根据原始通道数选择 RGB 或 RGBA 格式

use std::path::Path;

use image::{DynamicImage, GenericImageView};

use crate::{FlipbookError, Result};
use super::Texture;

/// 从文件加载纹理
pub fn load_texture<P: AsRef<Path>>(path: P) -> Result<Texture> {
    let img = image::open(path.as_ref()).map_err(|e| {
        FlipbookError::Texture(format!("Failed to load {}: {}", path.as_ref().display(), e))
    })?;
    Ok(decode(img))
}

/// 从内存加载纹理
pub fn load_texture_from_memory(data: &[u8]) -> Result<Texture> {
    let img = image::load_from_memory(data)
        .map_err(|e| FlipbookError::Texture(format!("Failed to load texture from memory: {}", e)))?;
    Ok(decode(img))
}

fn decode(img: DynamicImage) -> Texture {
    let (width, height) = img.dimensions();
    let has_alpha = img.color().has_alpha();

    let data = if has_alpha {
        // RGBA（4字节/像素）
        image::imageops::flip_vertical(&img.to_rgba8()).into_raw()
    } else {
        // RGB（3字节/像素）
        image::imageops::flip_vertical(&img.to_rgb8()).into_raw()
    };

    Texture::new(width, height, data, has_alpha)
}
