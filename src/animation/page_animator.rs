//! 单页每帧动画
//!
//! 每帧根据页面打开/合拢状态、页码和翻页进度计算每根骨骼的目标角度，
//! 再用临界阻尼平滑地逼近目标。

use std::time::Duration;

use glam::Quat;

use crate::config::BookConfig;
use crate::skeleton::{page_rotation, BoneChain};

use super::curve::{bone_target, target_rotation, turning_time};
use super::damp::lerp;
use super::SmoothedAngle;

/// 单页每帧输入
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageFrameInput {
    /// 页码（从 0 开始）
    pub page_number: usize,
    /// 页码小于显示页，即该页已翻过去
    pub opened: bool,
    /// 显示页为 0 或等于总页数，整本书合拢
    pub book_closed: bool,
    /// 指针悬停高亮
    pub highlighted: bool,
}

/// 单页运行时状态
#[derive(Clone, Debug, Default)]
pub struct PageRuntimeState {
    /// 上一帧是否打开
    pub last_opened: bool,
    /// 最近一次打开/合拢状态切换的时间
    pub turn_started_at: Option<Duration>,
    /// 当前自发光强度（已平滑）
    pub emissive_intensity: f32,
}

/// 单页动画器，页面组的旋转代替骨骼 0 参与弯曲
#[derive(Clone, Debug)]
pub struct PageAnimator {
    state: PageRuntimeState,
    group_bend: SmoothedAngle,
    group_fold: SmoothedAngle,
}

impl PageAnimator {
    /// `opened` 为挂载时的打开状态，不会触发翻页弯曲
    pub fn new(opened: bool) -> Self {
        Self {
            state: PageRuntimeState {
                last_opened: opened,
                ..PageRuntimeState::default()
            },
            group_bend: SmoothedAngle::default(),
            group_fold: SmoothedAngle::default(),
        }
    }

    pub fn state(&self) -> &PageRuntimeState {
        &self.state
    }

    pub fn emissive_intensity(&self) -> f32 {
        self.state.emissive_intensity
    }

    /// 页面组当前旋转
    pub fn group_rotation(&self) -> Quat {
        page_rotation(self.group_fold.value(), self.group_bend.value())
    }

    /// 页面组当前弯曲角（Y）
    pub fn group_bend(&self) -> f32 {
        self.group_bend.value()
    }

    /// 页面组当前折痕角（X）
    pub fn group_fold(&self) -> f32 {
        self.group_fold.value()
    }

    /// 当前翻页进度（0 → 1 → 0）
    pub fn turning_time(&self, now: Duration, config: &BookConfig) -> f32 {
        match self.state.turn_started_at {
            Some(started) => turning_time(
                now.saturating_sub(started),
                Duration::from_millis(config.turn_duration_ms),
            ),
            None => 0.0,
        }
    }

    /// 推进一帧并刷新骨骼链的变换和蒙皮矩阵
    pub fn tick(
        &mut self,
        chain: &mut BoneChain,
        input: &PageFrameInput,
        now: Duration,
        delta: f32,
        config: &BookConfig,
    ) {
        let delta = clamp_delta(delta, config);

        // 1. 自发光，按调用次数插值
        let emissive_target = if input.highlighted { config.highlight_intensity } else { 0.0 };
        self.state.emissive_intensity = lerp(
            self.state.emissive_intensity,
            emissive_target,
            config.emissive_lerp_factor,
        );

        // 2. 记录翻页开始时间
        if input.opened != self.state.last_opened {
            self.state.turn_started_at = Some(now);
            self.state.last_opened = input.opened;
        }

        // 3-4. 翻页进度和整体目标角度
        let turning = self.turning_time(now, config);
        let target = target_rotation(input.opened, input.book_closed, input.page_number, config);

        // 5. 逐骨骼计算目标并阻尼
        let bone_count = chain.bone_count();
        for (i, bone) in chain.bones_mut().iter_mut().enumerate() {
            let goal = bone_target(i, bone_count, target, turning, input.book_closed, config);
            let (bend, fold) = if i == 0 {
                (&mut self.group_bend, &mut self.group_fold)
            } else {
                (&mut bone.bend, &mut bone.fold)
            };
            bend.damp_to(goal.bend, config.bend_smooth_time, delta, config.damp_epsilon);
            fold.damp_to(goal.fold, config.fold_smooth_time, delta, config.damp_epsilon);
        }

        chain.update_transforms();
        chain.end_update();
    }
}

/// 截断帧间隔：非正数或非有限值取最小值，卡顿帧取最大值
pub fn clamp_delta(delta: f32, config: &BookConfig) -> f32 {
    if !delta.is_finite() {
        return config.min_frame_delta;
    }
    delta.clamp(config.min_frame_delta, config.max_frame_delta)
}
