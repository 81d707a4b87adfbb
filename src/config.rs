//! 书本配置
//!
//! 所有参数扁平化，直接在代码中修改默认值即可。

use once_cell::sync::Lazy;
use std::sync::RwLock;

use crate::{FlipbookError, Result};

/// 书本配置（扁平化，不嵌套）
#[derive(Debug, Clone, PartialEq)]
pub struct BookConfig {
    // ========== 页面尺寸 ==========
    /// 页面宽度（弯曲方向），默认 1.28
    pub page_width: f32,
    /// 页面高度，默认 1.71
    pub page_height: f32,
    /// 页面厚度，默认 0.003
    pub page_depth: f32,
    /// 弯曲方向分段数（骨骼数 = 分段数 + 1），默认 30
    pub page_segments: usize,
    /// 高度方向分段数，默认 2
    pub height_segments: usize,

    // ========== 弯曲曲线 ==========
    /// 靠近书脊的内卷强度，默认 0.18
    pub inside_curve_strength: f32,
    /// 靠近外缘的外卷强度，默认 0.05
    pub outside_curve_strength: f32,
    /// 翻页过程中的弯曲强度，默认 0.09
    pub turning_curve_strength: f32,
    /// 内卷曲线作用的骨骼数量（索引小于此值），默认 8
    pub inside_curve_bones: usize,

    // ========== 阻尼 ==========
    /// 主弯曲轴（Y）平滑时间（秒），默认 0.5
    pub bend_smooth_time: f32,
    /// 折痕轴（X）平滑时间（秒），默认 0.3
    pub fold_smooth_time: f32,
    /// 阻尼吸附阈值（弧度），差值小于此值直接吸附到目标，默认 0.001
    pub damp_epsilon: f32,
    /// 参与阻尼计算的最小帧间隔（秒），默认 1e-4
    pub min_frame_delta: f32,
    /// 参与阻尼计算的最大帧间隔（秒），默认 0.1
    /// 卡顿后的超大帧间隔会被截断，避免一步跳到终点
    pub max_frame_delta: f32,

    // ========== 翻页 ==========
    /// 翻页弯曲持续时间（毫秒），默认 400
    pub turn_duration_ms: u64,
    /// 每页的扇形错开角度（度），默认 0.8
    pub fan_out_degrees: f32,
    /// 折痕基础角度（度），默认 2.0
    pub fold_degrees: f32,

    // ========== 步进 ==========
    /// 剩余距离较大时的步进间隔（毫秒），默认 50
    pub fast_step_delay_ms: u64,
    /// 接近目标时的步进间隔（毫秒），默认 150
    pub slow_step_delay_ms: u64,
    /// 剩余距离大于此值时使用快速步进，默认 2
    pub fast_step_distance: usize,

    // ========== 材质 ==========
    /// 悬停高亮的自发光强度，默认 0.22
    pub highlight_intensity: f32,
    /// 自发光强度每帧插值系数，默认 0.1
    pub emissive_lerp_factor: f32,
    /// 内页固定粗糙度，默认 0.1
    pub interior_roughness: f32,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            // ====== 页面尺寸 ======
            // 宽高比接近 3:4 的竖版书
            page_width: 1.28,
            page_height: 1.71,
            page_depth: 0.003,
            // 分段越多弯曲越圆滑，但骨骼和顶点数随之增加
            page_segments: 30,
            height_segments: 2,

            // ====== 弯曲曲线 ======
            inside_curve_strength: 0.18,
            outside_curve_strength: 0.05,
            turning_curve_strength: 0.09,
            inside_curve_bones: 8,

            // ====== 阻尼 ======
            // 越大 → 页面跟随越慢、越"软"
            bend_smooth_time: 0.5,
            fold_smooth_time: 0.3,
            damp_epsilon: 0.001,
            min_frame_delta: 1e-4,
            max_frame_delta: 0.1,

            // ====== 翻页 ======
            turn_duration_ms: 400,
            fan_out_degrees: 0.8,
            fold_degrees: 2.0,

            // ====== 步进 ======
            fast_step_delay_ms: 50,
            slow_step_delay_ms: 150,
            fast_step_distance: 2,

            // ====== 材质 ======
            highlight_intensity: 0.22,
            emissive_lerp_factor: 0.1,
            interior_roughness: 0.1,
        }
    }
}

impl BookConfig {
    /// 单个分段宽度
    pub fn segment_width(&self) -> f32 {
        self.page_width / self.page_segments as f32
    }

    /// 骨骼链长度（分段数 + 1）
    pub fn bone_count(&self) -> usize {
        self.page_segments + 1
    }

    /// 校验配置，拒绝退化的几何和时间参数
    pub fn validate(&self) -> Result<()> {
        if self.page_segments == 0 || self.height_segments == 0 {
            return Err(FlipbookError::InvalidGeometry(format!(
                "segment counts must be positive (width={}, height={})",
                self.page_segments, self.height_segments
            )));
        }
        let dims = [self.page_width, self.page_height, self.page_depth];
        if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(FlipbookError::InvalidGeometry(format!(
                "page dimensions must be positive: {}x{}x{}",
                self.page_width, self.page_height, self.page_depth
            )));
        }
        if !(self.min_frame_delta > 0.0 && self.max_frame_delta >= self.min_frame_delta) {
            return Err(FlipbookError::InvalidGeometry(format!(
                "frame delta clamp is inverted: [{}, {}]",
                self.min_frame_delta, self.max_frame_delta
            )));
        }
        Ok(())
    }
}

/// 全局配置实例
static BOOK_CONFIG: Lazy<RwLock<BookConfig>> = Lazy::new(|| RwLock::new(BookConfig::default()));

/// 获取当前配置（只读）
pub fn get_config() -> BookConfig {
    match BOOK_CONFIG.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// 手动设置配置（用于运行时调试）
pub fn set_config(config: BookConfig) {
    match BOOK_CONFIG.write() {
        Ok(mut guard) => *guard = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// 重置为默认配置
pub fn reset_config() {
    set_config(BookConfig::default());
}
