//! 书本运行时
//!
//! 持有全部页面的网格和动画器，以及显示页步进器。渲染循环每帧调用一次
//! [`Book::tick`]，然后读取每页的 [`PagePose`]。

use std::sync::Arc;
use std::time::Duration;

use glam::{Mat4, Quat};

use crate::animation::{PageAnimator, PageFrameInput, PageStepper};
use crate::config::{get_config, BookConfig};
use crate::model::{PageGeometry, PageMesh, PageSurfaces};
use crate::page::{PageConfig, COVER_ROUGHNESS_SURFACE};
use crate::texture::SurfaceLibrary;
use crate::{FlipbookError, Result};

/// 单页输出给渲染层的姿态
#[derive(Clone, Debug)]
pub struct PagePose {
    pub number: usize,
    /// 页面组旋转（代替骨骼 0）
    pub group_rotation: Quat,
    /// 页面堆叠偏移（Z）
    pub z_offset: f32,
    /// 每根骨骼的本地旋转
    pub bone_rotations: Vec<Quat>,
    /// 蒙皮矩阵（网格空间）
    pub skinning_matrices: Vec<Mat4>,
    pub emissive_intensity: f32,
}

/// 单个页面槽位
struct PageSlot {
    mesh: PageMesh,
    animator: PageAnimator,
    highlighted: bool,
}

/// 书本
pub struct Book {
    config: BookConfig,
    pages: PageConfig,
    slots: Vec<PageSlot>,
    stepper: PageStepper,
    clock: Duration,
}

impl Book {
    /// 构建全部页面网格，显示页和目标页都从 `initial_page` 开始
    pub fn new(
        pages: PageConfig,
        library: &mut SurfaceLibrary,
        config: BookConfig,
        initial_page: usize,
    ) -> Result<Self> {
        if pages.is_empty() {
            return Err(FlipbookError::EmptyBook);
        }

        let geometry = Arc::new(PageGeometry::build(&config)?);
        let page_count = pages.len();
        let stepper = PageStepper::new(page_count, initial_page, &config);
        let displayed = stepper.displayed();

        let mut slots = Vec::with_capacity(page_count);
        for (number, descriptor) in pages.iter().enumerate() {
            let roughness = if pages.is_cover(number) {
                Some(library.resolve(COVER_ROUGHNESS_SURFACE)?)
            } else {
                None
            };
            let surfaces = PageSurfaces {
                front: library.resolve(&descriptor.front)?,
                back: library.resolve(&descriptor.back)?,
                roughness,
            };
            let mesh = PageMesh::build(number, page_count, Arc::clone(&geometry), surfaces, &config)?;
            slots.push(PageSlot {
                mesh,
                animator: PageAnimator::new(number < displayed),
                highlighted: false,
            });
        }

        log::info!(
            "书本构建完成: {} 页, {} 根骨骼/页, {} 个顶点/页, 初始页 {}",
            page_count,
            geometry.required_bone_count(),
            geometry.vertex_count(),
            displayed,
        );

        Ok(Self {
            config,
            pages,
            slots,
            stepper,
            clock: Duration::ZERO,
        })
    }

    /// 使用全局配置构建，从合拢的封面开始
    pub fn with_default_config(pages: PageConfig, library: &mut SurfaceLibrary) -> Result<Self> {
        Self::new(pages, library, get_config(), 0)
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    pub fn pages(&self) -> &PageConfig {
        &self.pages
    }

    /// 页数
    pub fn page_count(&self) -> usize {
        self.slots.len()
    }

    /// 当前显示页
    pub fn displayed_page(&self) -> usize {
        self.stepper.displayed()
    }

    /// 当前目标页
    pub fn requested_page(&self) -> usize {
        self.stepper.requested()
    }

    pub fn stepper(&self) -> &PageStepper {
        &self.stepper
    }

    /// 累计时间
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// 显示页为 0 或等于页数时整本书合拢
    pub fn is_closed(&self) -> bool {
        let displayed = self.stepper.displayed();
        displayed == 0 || displayed == self.page_count()
    }

    /// 设置目标页，越界值截断到 `[0, 页数]`
    pub fn request_page(&mut self, page: usize) -> Option<usize> {
        self.stepper.request(page, self.clock)
    }

    /// 点击页面：未翻开的页翻过去，已翻开的页翻回来
    pub fn click_page(&mut self, number: usize) -> Option<usize> {
        self.slots.get_mut(number)?.highlighted = false;
        let opened = number < self.stepper.displayed();
        let target = if opened { number } else { number + 1 };
        self.request_page(target)
    }

    /// 指针进入/离开页面
    pub fn set_highlighted(&mut self, number: usize, highlighted: bool) {
        if let Some(slot) = self.slots.get_mut(number) {
            slot.highlighted = highlighted;
        }
    }

    pub fn is_highlighted(&self, number: usize) -> bool {
        self.slots.get(number).is_some_and(|s| s.highlighted)
    }

    /// 卸载：取消待执行的步进
    pub fn teardown(&mut self) {
        self.stepper.cancel();
    }

    /// 第 `number` 页本帧的动画输入
    pub fn page_input(&self, number: usize) -> PageFrameInput {
        PageFrameInput {
            page_number: number,
            opened: number < self.stepper.displayed(),
            book_closed: self.is_closed(),
            highlighted: self.is_highlighted(number),
        }
    }

    /// 推进一帧
    pub fn tick(&mut self, delta: f32) {
        self.clock += Duration::try_from_secs_f32(delta).unwrap_or_default();
        self.stepper.poll(self.clock);

        for number in 0..self.slots.len() {
            let input = self.page_input(number);
            let slot = &mut self.slots[number];
            slot.animator
                .tick(&mut slot.mesh.skeleton, &input, self.clock, delta, &self.config);
            slot.mesh.set_emissive_intensity(slot.animator.emissive_intensity());
        }
    }

    /// 页面堆叠偏移：已翻过的页向后、未翻的页向前错开一个厚度
    pub fn z_offset(&self, number: usize) -> f32 {
        (self.stepper.displayed() as f32 - number as f32) * self.config.page_depth
    }

    /// 获取页面网格
    pub fn page_mesh(&self, number: usize) -> Option<&PageMesh> {
        self.slots.get(number).map(|s| &s.mesh)
    }

    /// 获取页面动画器
    pub fn page_animator(&self, number: usize) -> Option<&PageAnimator> {
        self.slots.get(number).map(|s| &s.animator)
    }

    /// 第 `number` 页的当前姿态
    pub fn pose(&self, number: usize) -> Option<PagePose> {
        let slot = self.slots.get(number)?;
        Some(PagePose {
            number,
            group_rotation: slot.animator.group_rotation(),
            z_offset: self.z_offset(number),
            bone_rotations: slot.mesh.skeleton.bones().iter().map(|b| b.rotation()).collect(),
            skinning_matrices: slot.mesh.skinning_matrices().to_vec(),
            emissive_intensity: slot.mesh.emissive_intensity(),
        })
    }

    /// 全部页面的当前姿态
    pub fn poses(&self) -> Vec<PagePose> {
        (0..self.slots.len()).filter_map(|n| self.pose(n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const FRAME: f32 = 1.0 / 60.0;

    fn book(page_count: usize) -> Book {
        let pages = PageConfig::new(
            (0..page_count)
                .map(|i| crate::page::PageDescriptor::new(format!("f{}", i), format!("b{}", i)))
                .collect(),
        );
        let mut library = SurfaceLibrary::placeholder_only();
        Book::new(pages, &mut library, BookConfig::default(), 0).unwrap()
    }

    fn max_bone_angle(book: &Book, number: usize) -> f32 {
        book.page_mesh(number)
            .unwrap()
            .skeleton
            .bones()
            .iter()
            .map(|b| b.bend.value().abs().max(b.fold.value().abs()))
            .fold(0.0, f32::max)
    }

    #[test]
    fn test_empty_book_is_rejected() {
        let mut library = SurfaceLibrary::placeholder_only();
        let result = Book::new(PageConfig::default(), &mut library, BookConfig::default(), 0);
        assert!(matches!(result, Err(FlipbookError::EmptyBook)));
    }

    #[test]
    fn test_request_walks_one_page_at_a_time() {
        let mut book = book(10);
        book.request_page(3);
        assert_eq!(book.displayed_page(), 1);

        let mut changes = vec![(0u64, 1usize)];
        for tick in 1..=1_000u64 {
            let before = book.displayed_page();
            book.tick(0.001);
            if book.displayed_page() != before {
                assert_eq!(book.displayed_page().abs_diff(before), 1);
                changes.push((tick, book.displayed_page()));
            }
        }

        let pages: Vec<usize> = changes.iter().map(|(_, p)| *p).collect();
        assert_eq!(pages, vec![1, 2, 3]);
        for pair in changes.windows(2) {
            let gap = pair[1].0 - pair[0].0;
            assert!((149..=151).contains(&gap), "gap was {}ms", gap);
        }
        assert!(book.stepper().is_idle());
    }

    #[test]
    fn test_large_jump_has_no_skips() {
        let mut book = book(10);
        book.request_page(10);
        let mut seen = vec![book.displayed_page()];
        for _ in 0..200 {
            book.tick(FRAME);
            if *seen.last().unwrap() != book.displayed_page() {
                seen.push(book.displayed_page());
            }
        }
        assert_eq!(seen, (1..=10).collect::<Vec<_>>());
        assert!(book.is_closed());
    }

    #[test]
    fn test_closed_book_converges_to_rigid_stack() {
        let mut book = book(5);
        for _ in 0..600 {
            book.tick(FRAME);
        }
        for number in 0..5 {
            let animator = book.page_animator(number).unwrap();
            assert!((animator.group_bend() - FRAC_PI_2).abs() < 1e-3);
            assert_eq!(max_bone_angle(&book, number), 0.0);
        }
    }

    #[test]
    fn test_single_page_opens_rigidly() {
        let mut book = book(1);
        book.click_page(0);
        assert_eq!(book.displayed_page(), 1);
        assert!(book.is_closed());

        for _ in 0..24 {
            book.tick(FRAME);
            assert_eq!(max_bone_angle(&book, 0), 0.0);
        }
        assert!(book.page_animator(0).unwrap().group_bend() < 0.0);

        for _ in 0..600 {
            book.tick(FRAME);
        }
        assert!((book.page_animator(0).unwrap().group_bend() + FRAC_PI_2).abs() < 1e-3);
        assert_eq!(max_bone_angle(&book, 0), 0.0);
    }

    #[test]
    fn test_curvature_activates_when_book_opens() {
        let mut book = book(3);
        for _ in 0..30 {
            book.tick(FRAME);
        }
        assert_eq!(max_bone_angle(&book, 0), 0.0);

        book.request_page(1);
        assert!(!book.is_closed());
        for _ in 0..12 {
            book.tick(FRAME);
        }
        assert!(max_bone_angle(&book, 0) > 0.0);
    }

    #[test]
    fn test_click_toggles_pages() {
        let mut book = book(4);
        book.set_highlighted(0, true);
        assert_eq!(book.click_page(0), Some(1));
        assert!(!book.is_highlighted(0));

        // 第 0 页已翻开，再次点击翻回
        assert_eq!(book.click_page(0), Some(0));
        assert_eq!(book.click_page(9), None);
    }

    #[test]
    fn test_highlight_drives_emissive() {
        let mut book = book(2);
        book.set_highlighted(1, true);
        for _ in 0..120 {
            book.tick(FRAME);
        }
        let pose = book.pose(1).unwrap();
        assert!((pose.emissive_intensity - 0.22).abs() < 1e-3);
        assert_eq!(book.pose(0).unwrap().emissive_intensity, 0.0);
    }

    #[test]
    fn test_out_of_range_request_is_clamped() {
        let mut book = book(3);
        book.request_page(50);
        assert_eq!(book.requested_page(), 3);
    }

    #[test]
    fn test_teardown_cancels_pending_step() {
        let mut book = book(10);
        book.request_page(5);
        book.teardown();
        for _ in 0..120 {
            book.tick(FRAME);
        }
        assert_eq!(book.displayed_page(), 1);
        assert!(book.stepper().pending().is_none());
    }

    #[test]
    fn test_bad_delta_does_not_break_animation() {
        let mut book = book(3);
        book.request_page(1);
        book.tick(-1.0);
        book.tick(0.0);
        book.tick(f32::NAN);
        book.tick(1.0e9);
        for pose in book.poses() {
            assert!(pose.group_rotation.is_finite());
            assert!(pose.bone_rotations.iter().all(|q| q.is_finite()));
        }
    }

    #[test]
    fn test_z_offsets_stack_pages() {
        let mut book = book(4);
        book.request_page(1);
        let depth = book.config().page_depth;
        assert!((book.z_offset(0) - depth).abs() < 1e-7);
        assert!(book.z_offset(1).abs() < 1e-7);
        assert!((book.z_offset(3) + 2.0 * depth).abs() < 1e-7);
    }

    #[test]
    fn test_pose_shape() {
        let book = book(2);
        let pose = book.pose(0).unwrap();
        let bones = book.config().bone_count();
        assert_eq!(pose.bone_rotations.len(), bones);
        assert_eq!(pose.skinning_matrices.len(), bones);
        assert!(book.pose(2).is_none());
    }
}
