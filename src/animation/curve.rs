//! 页面弯曲曲线
//!
//! 每根骨骼的目标角度由三条曲线叠加：靠近书脊的内卷、靠近外缘的外卷、
//! 以及随翻页进度起伏的钟形弯曲。

use std::f32::consts::PI;
use std::time::Duration;

use crate::config::BookConfig;

/// 翻页进度缓动：0 → 1 → 0 的正弦曲线，窗口结束后保持 0
pub fn turning_time(elapsed: Duration, turn_duration: Duration) -> f32 {
    if turn_duration.is_zero() {
        return 0.0;
    }
    let progress = (elapsed.as_secs_f32() / turn_duration.as_secs_f32()).min(1.0);
    let eased = (progress * PI).sin();
    // sin(π) 在浮点下不是精确的 0
    if progress >= 1.0 {
        0.0
    } else {
        eased
    }
}

/// 内卷强度，只作用于前 `inside_bones` 根骨骼
pub fn inside_curve(index: usize, inside_bones: usize) -> f32 {
    if index < inside_bones {
        (index as f32 * 0.2 + 0.25).sin()
    } else {
        0.0
    }
}

/// 外卷强度，与内卷按索引互斥
pub fn outside_curve(index: usize, inside_bones: usize) -> f32 {
    if index >= inside_bones {
        (index as f32 * 0.3 + 0.09).cos()
    } else {
        0.0
    }
}

/// 沿骨骼链的钟形翻页强度
pub fn turning_intensity(index: usize, bone_count: usize, turning_time: f32) -> f32 {
    (index as f32 * PI / bone_count as f32).sin() * turning_time
}

/// 折痕强度，只作用于外缘一侧
pub fn fold_intensity(index: usize, inside_bones: usize, bone_count: usize, turning_time: f32) -> f32 {
    if index > inside_bones {
        (index as f32 * PI / bone_count as f32 - 0.5).sin() * turning_time
    } else {
        0.0
    }
}

/// 页面整体目标角度：打开 -90°，合上 +90°；书未合拢时按页码错开
pub fn target_rotation(opened: bool, book_closed: bool, page_number: usize, config: &BookConfig) -> f32 {
    let mut target = if opened { -PI / 2.0 } else { PI / 2.0 };
    if !book_closed {
        target += (page_number as f32 * config.fan_out_degrees).to_radians();
    }
    target
}

/// 单根骨骼的目标角度
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoneTarget {
    /// 主弯曲轴（Y）
    pub bend: f32,
    /// 折痕轴（X）
    pub fold: f32,
}

/// 计算骨骼 `index` 的目标弯曲角和折痕角
///
/// 书本合拢时退化为刚性平板：骨骼 0（页面组）直接转到目标角度，其余骨骼全部归零。
pub fn bone_target(
    index: usize,
    bone_count: usize,
    target: f32,
    turning_time: f32,
    book_closed: bool,
    config: &BookConfig,
) -> BoneTarget {
    if book_closed {
        return if index == 0 {
            BoneTarget { bend: target, fold: 0.0 }
        } else {
            BoneTarget::default()
        };
    }

    let inside_bones = config.inside_curve_bones;
    let inside = inside_curve(index, inside_bones);
    let outside = outside_curve(index, inside_bones);
    let turning = turning_intensity(index, bone_count, turning_time);

    let bend = config.inside_curve_strength * inside * target
        - config.outside_curve_strength * outside * target
        + config.turning_curve_strength * turning * target;

    let fold_base = target.signum() * config.fold_degrees.to_radians();
    let fold = fold_base * fold_intensity(index, inside_bones, bone_count, turning_time);

    BoneTarget { bend, fold }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TURN: Duration = Duration::from_millis(400);

    #[test]
    fn test_turning_time_shape() {
        assert_eq!(turning_time(Duration::ZERO, TURN), 0.0);
        assert!((turning_time(Duration::from_millis(200), TURN) - 1.0).abs() < 1e-6);
        assert!((turning_time(Duration::from_millis(100), TURN) - (PI / 4.0).sin()).abs() < 1e-6);
        assert_eq!(turning_time(Duration::from_millis(400), TURN), 0.0);
        assert_eq!(turning_time(Duration::from_secs(60), TURN), 0.0);
    }

    #[test]
    fn test_curves_are_mutually_exclusive() {
        for i in 0..31 {
            let inside = inside_curve(i, 8);
            let outside = outside_curve(i, 8);
            assert!(inside == 0.0 || outside == 0.0, "bone {} has both curves", i);
        }
        assert!((inside_curve(0, 8) - 0.25f32.sin()).abs() < 1e-6);
        assert!((outside_curve(8, 8) - (8.0f32 * 0.3 + 0.09).cos()).abs() < 1e-6);
    }

    #[test]
    fn test_fold_only_past_inside_bones() {
        assert_eq!(fold_intensity(8, 8, 31, 1.0), 0.0);
        assert!(fold_intensity(9, 8, 31, 1.0) > 0.0);
        assert_eq!(fold_intensity(20, 8, 31, 0.0), 0.0);
    }

    #[test]
    fn test_target_rotation() {
        let config = BookConfig::default();
        assert!((target_rotation(true, true, 5, &config) + PI / 2.0).abs() < 1e-6);
        assert!((target_rotation(false, true, 5, &config) - PI / 2.0).abs() < 1e-6);

        let fanned = target_rotation(false, false, 5, &config);
        assert!((fanned - (PI / 2.0 + 4.0f32.to_radians())).abs() < 1e-6);
    }

    #[test]
    fn test_closed_book_override() {
        let config = BookConfig::default();
        let target = PI / 2.0;
        assert_eq!(bone_target(0, 31, target, 1.0, true, &config), BoneTarget { bend: target, fold: 0.0 });
        for i in 1..31 {
            assert_eq!(bone_target(i, 31, target, 1.0, true, &config), BoneTarget::default());
        }
    }

    #[test]
    fn test_open_book_blend() {
        let config = BookConfig::default();
        let target = -PI / 2.0;
        let t = bone_target(3, 31, target, 0.5, false, &config);
        let expected = 0.18 * (3.0f32 * 0.2 + 0.25).sin() * target
            + 0.09 * (3.0 * PI / 31.0).sin() * 0.5 * target;
        assert!((t.bend - expected).abs() < 1e-6);
        assert_eq!(t.fold, 0.0);

        let edge = bone_target(20, 31, target, 1.0, false, &config);
        assert!(edge.fold < 0.0, "fold follows the sign of the target");
    }
}
