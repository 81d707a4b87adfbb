//! 翻页步进状态机
//!
//! 显示页每次只向目标页移动一页，两步之间按剩余距离选择间隔：
//! 距离较远时快速翻动，接近目标时放慢。同一时刻最多只有一个待执行步。

use std::time::Duration;

use crate::config::BookConfig;

/// 待执行的下一步
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingStep {
    pub due_at: Duration,
}

/// 显示页步进器
#[derive(Clone, Debug)]
pub struct PageStepper {
    page_count: usize,
    requested: usize,
    displayed: usize,
    pending: Option<PendingStep>,
    fast_delay: Duration,
    slow_delay: Duration,
    fast_distance: usize,
}

impl PageStepper {
    /// 显示页和目标页都从 `initial` 开始
    pub fn new(page_count: usize, initial: usize, config: &BookConfig) -> Self {
        let initial = initial.min(page_count);
        Self {
            page_count,
            requested: initial,
            displayed: initial,
            pending: None,
            fast_delay: Duration::from_millis(config.fast_step_delay_ms),
            slow_delay: Duration::from_millis(config.slow_step_delay_ms),
            fast_distance: config.fast_step_distance,
        }
    }

    pub fn displayed(&self) -> usize {
        self.displayed
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn pending(&self) -> Option<PendingStep> {
        self.pending
    }

    /// 显示页已追上目标且没有待执行步
    pub fn is_idle(&self) -> bool {
        self.pending.is_none() && self.displayed == self.requested
    }

    /// 设置目标页
    ///
    /// 超出 `[0, page_count]` 的值会被截断。目标变化时取消待执行步并立即走一步；
    /// 返回这一步之后的显示页。目标未变化时返回 None，除非步进已被取消而停在半路。
    pub fn request(&mut self, page: usize, now: Duration) -> Option<usize> {
        let page = if page > self.page_count {
            log::warn!(
                "requested page {} is out of range, clamping to {}",
                page, self.page_count
            );
            self.page_count
        } else {
            page
        };

        // 目标未变且仍在推进（或已追上）时不产生新的步进
        let stalled = self.pending.is_none() && self.displayed != self.requested;
        if page == self.requested && !stalled {
            return None;
        }

        self.requested = page;
        self.pending = None;
        self.step(now)
    }

    /// 到期时执行待执行步，返回新的显示页
    pub fn poll(&mut self, now: Duration) -> Option<usize> {
        match self.pending {
            Some(pending) if pending.due_at <= now => {
                self.pending = None;
                self.step(now)
            }
            _ => None,
        }
    }

    /// 取消待执行步，不产生其他副作用
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            log::debug!("page stepper cancelled at displayed page {}", self.displayed);
        }
    }

    /// 走一步并安排下一步
    fn step(&mut self, now: Duration) -> Option<usize> {
        if self.displayed == self.requested {
            return None;
        }

        if self.requested > self.displayed {
            self.displayed += 1;
        } else {
            self.displayed -= 1;
        }

        let remaining = self.displayed.abs_diff(self.requested);
        if remaining > 0 {
            let delay = if remaining > self.fast_distance {
                self.fast_delay
            } else {
                self.slow_delay
            };
            self.pending = Some(PendingStep { due_at: now + delay });
        }

        log::debug!(
            "page step -> {} (target {}, remaining {})",
            self.displayed, self.requested, remaining
        );
        Some(self.displayed)
    }
}
