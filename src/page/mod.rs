//! 页面内容描述

/// 封面贴图标识
pub const COVER_SURFACE: &str = "book-cover";
/// 封底贴图标识
pub const BACK_COVER_SURFACE: &str = "book-back";
/// 封面/封底粗糙度贴图标识
pub const COVER_ROUGHNESS_SURFACE: &str = "book-cover-roughness";

/// 单页描述：正反两面的贴图标识
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageDescriptor {
    pub front: String,
    pub back: String,
}

impl PageDescriptor {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self { front: front.into(), back: back.into() }
    }
}

/// 全书页面列表，启动时确定，之后不可变
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageConfig {
    pages: Vec<PageDescriptor>,
}

impl PageConfig {
    pub fn new(pages: Vec<PageDescriptor>) -> Self {
        Self { pages }
    }

    /// 从图片列表排版成书
    ///
    /// 第一页正面是封面、背面是第一张图；之后每页依次放两张图；
    /// 最后一页正面是最后一张图、背面是封底。
    pub fn from_pictures<S: AsRef<str>>(pictures: &[S]) -> Self {
        let Some(first) = pictures.first() else {
            return Self::default();
        };
        let mut pages = vec![PageDescriptor::new(COVER_SURFACE, first.as_ref())];

        let count = pictures.len();
        let mut i = 1;
        while i + 1 < count {
            pages.push(PageDescriptor::new(
                pictures[i].as_ref(),
                pictures[(i + 1) % count].as_ref(),
            ));
            i += 2;
        }

        pages.push(PageDescriptor::new(pictures[count - 1].as_ref(), BACK_COVER_SURFACE));
        Self { pages }
    }

    /// 页数
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PageDescriptor> {
        self.pages.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageDescriptor> {
        self.pages.iter()
    }

    /// 是否为封面/封底页（使用硬质粗糙度贴图）
    pub fn is_cover(&self, index: usize) -> bool {
        index == 0 || index + 1 == self.pages.len()
    }
}
