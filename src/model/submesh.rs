//! 子网格定义

use std::ops::Range;

/// 子网格：使用同一材质槽的一段连续索引
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubMesh {
    pub begin_index: u32,
    pub index_count: u32,
    pub material_slot: usize,
}

impl SubMesh {
    pub fn new(begin_index: u32, index_count: u32, material_slot: usize) -> Self {
        Self { begin_index, index_count, material_slot }
    }

    /// 在索引缓冲区中的范围
    pub fn index_range(&self) -> Range<usize> {
        let begin = self.begin_index as usize;
        begin..begin + self.index_count as usize
    }
}
