//! 贴图库：按贴图标识解析文件并缓存

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::Result;
use super::{load_texture, Texture};

/// 贴图库
///
/// 标识 `id` 对应文件 `<root>/<id>.<extension>`。非严格模式下缺失或损坏的
/// 文件用占位图代替，保证页面网格总能构建。
pub struct SurfaceLibrary {
    root: Option<PathBuf>,
    extension: String,
    strict: bool,
    cache: HashMap<String, Arc<Texture>>,
    placeholder: Arc<Texture>,
}

impl SurfaceLibrary {
    pub fn new(root: impl AsRef<Path>, extension: impl Into<String>) -> Self {
        Self {
            root: Some(root.as_ref().to_path_buf()),
            extension: extension.into(),
            strict: false,
            cache: HashMap::new(),
            placeholder: Arc::new(Texture::placeholder()),
        }
    }

    /// 不访问磁盘，所有贴图都解析为占位图
    pub fn placeholder_only() -> Self {
        Self {
            root: None,
            extension: String::new(),
            strict: false,
            cache: HashMap::new(),
            placeholder: Arc::new(Texture::placeholder()),
        }
    }

    /// 严格模式：加载失败时返回错误而不是占位图
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// 预先注册贴图（例如已在别处解码的图片）
    pub fn insert(&mut self, id: impl Into<String>, texture: Texture) {
        self.cache.insert(id.into(), Arc::new(texture));
    }

    /// 贴图文件路径
    pub fn path_for(&self, id: &str) -> Option<PathBuf> {
        self.root
            .as_ref()
            .map(|root| root.join(format!("{}.{}", id, self.extension)))
    }

    /// 解析贴图
    pub fn resolve(&mut self, id: &str) -> Result<Arc<Texture>> {
        if let Some(texture) = self.cache.get(id) {
            return Ok(Arc::clone(texture));
        }

        let Some(path) = self.path_for(id) else {
            return Ok(Arc::clone(&self.placeholder));
        };

        match load_texture(&path) {
            Ok(texture) => {
                let texture = Arc::new(texture);
                self.cache.insert(id.to_string(), Arc::clone(&texture));
                Ok(texture)
            }
            Err(e) if !self.strict => {
                log::warn!("贴图 {} 不可用，使用占位图: {}", id, e);
                self.cache.insert(id.to_string(), Arc::clone(&self.placeholder));
                Ok(Arc::clone(&self.placeholder))
            }
            Err(e) => Err(e),
        }
    }

    /// 已缓存的贴图数量
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }
}
