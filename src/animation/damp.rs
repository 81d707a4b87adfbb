//! 临界阻尼平滑
//!
//! 弹簧-阻尼器形式的平滑跟随（SmoothDamp），速度保存在状态里，
//! 因此在不同帧率下收敛轨迹一致。

use std::f32::consts::{PI, TAU};

/// 线性插值
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// 两个角度之间的最短有向差值，结果在 (-π, π]
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut delta = (target - current).rem_euclid(TAU);
    if delta > PI {
        delta -= TAU;
    }
    delta
}

/// exp(-x) 的有理近似，x 很大时趋近于 0 而不会出现负数
fn exp_decay(x: f32) -> f32 {
    1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x)
}

/// 带速度的平滑角度
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SmoothedAngle {
    value: f32,
    velocity: f32,
}

impl SmoothedAngle {
    pub fn new(value: f32) -> Self {
        Self { value, velocity: 0.0 }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// 立即设置角度并清除速度
    pub fn reset(&mut self, value: f32) {
        self.value = value;
        self.velocity = 0.0;
    }

    /// 朝目标角度阻尼一步，沿最短弧线移动
    ///
    /// 返回 false 表示已经吸附到目标。`delta` 必须为正，由调用方截断。
    pub fn damp_to(&mut self, target: f32, smooth_time: f32, delta: f32, epsilon: f32) -> bool {
        let target = self.value + delta_angle(self.value, target);

        if (self.value - target).abs() <= epsilon {
            self.value = target;
            self.velocity = 0.0;
            return false;
        }

        let smooth_time = smooth_time.max(0.0001);
        let omega = 2.0 / smooth_time;
        let decay = exp_decay(omega * delta);

        let change = self.value - target;
        let temp = (self.velocity + omega * change) * delta;
        self.velocity = (self.velocity - omega * temp) * decay;
        let mut output = target + (change + temp) * decay;

        // 防止越过目标
        if (target - self.value > 0.0) == (output > target) {
            output = target;
            self.velocity = 0.0;
        }

        self.value = output;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn settle(angle: &mut SmoothedAngle, target: f32, smooth_time: f32, dt: f32, steps: usize) {
        for _ in 0..steps {
            angle.damp_to(target, smooth_time, dt, 0.001);
        }
    }

    #[test]
    fn test_converges_to_target() {
        let mut angle = SmoothedAngle::new(0.0);
        settle(&mut angle, -FRAC_PI_2, 0.5, 1.0 / 60.0, 600);
        assert!((angle.value() + FRAC_PI_2).abs() < 1e-5);
        assert_eq!(angle.velocity(), 0.0);
    }

    #[test]
    fn test_never_overshoots() {
        let mut angle = SmoothedAngle::new(0.0);
        for _ in 0..300 {
            angle.damp_to(1.0, 0.3, 1.0 / 30.0, 0.001);
            assert!(angle.value() <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn test_frame_rate_independent() {
        let mut fast = SmoothedAngle::new(0.0);
        let mut slow = SmoothedAngle::new(0.0);
        settle(&mut fast, 1.0, 0.5, 1.0 / 120.0, 60);
        settle(&mut slow, 1.0, 0.5, 1.0 / 30.0, 15);
        assert!((fast.value() - slow.value()).abs() < 0.03);
    }

    #[test]
    fn test_huge_delta_is_stable() {
        let mut angle = SmoothedAngle::new(0.0);
        angle.damp_to(1.0, 0.5, 1000.0, 0.001);
        assert!(angle.value().is_finite());
        assert!((angle.value() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_takes_shortest_arc() {
        let mut angle = SmoothedAngle::new(3.0);
        angle.damp_to(-3.0, 0.5, 1.0 / 60.0, 0.001);
        // 从 3.0 到 -3.0 的最短路径穿过 π，数值应增大
        assert!(angle.value() > 3.0);
    }

    #[test]
    fn test_delta_angle_wraps() {
        assert!((delta_angle(0.0, TAU + 0.5) - 0.5).abs() < 1e-5);
        assert!((delta_angle(0.5, 0.0) + 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 0.22, 0.1) - 0.022).abs() < 1e-6);
    }
}
