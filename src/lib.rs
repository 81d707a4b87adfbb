//! Flipbook Engine - 可翻页书本的骨骼动画运行时
//!
//! 提供以下功能：
//! - 页面薄板网格构建与骨骼链绑定
//! - 顶点蒙皮权重计算和 CPU 蒙皮
//! - 每帧页面弯曲/翻页程序动画
//! - 显示页逐页追赶目标页的步进状态机
//! - 页面贴图加载（缺失时使用占位图）

pub mod animation;
pub mod book;
pub mod config;
pub mod model;
pub mod page;
pub mod skeleton;
pub mod skinning;
pub mod texture;

pub use animation::{PageAnimator, PageFrameInput, PageStepper, SmoothedAngle};
pub use book::{Book, PagePose};
pub use config::BookConfig;
pub use model::{PageGeometry, PageMesh, VertexInfluence};
pub use page::{PageConfig, PageDescriptor};
pub use skeleton::{Bone, BoneChain};
pub use texture::{SurfaceLibrary, Texture};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlipbookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Book has no pages")]
    EmptyBook,

    #[error("Bone count mismatch: mesh references {mesh} bones, chain has {chain}")]
    BoneCountMismatch { mesh: usize, chain: usize },

    #[error("Texture error: {0}")]
    Texture(String),
}

pub type Result<T> = std::result::Result<T, FlipbookError>;
