//! 线性骨骼链
//!
//! 骨骼按数组顺序排列，骨骼 i (i>0) 的父骨骼固定为 i-1，
//! 因此全局变换只需沿数组顺序依次相乘，不需要通用的树遍历。

use glam::{Mat4, Vec3};

use super::Bone;

/// 页面骨骼链
#[derive(Clone, Debug)]
pub struct BoneChain {
    bones: Vec<Bone>,
    skinning_matrices: Vec<Mat4>,
}

impl BoneChain {
    /// 构建 segments + 1 根骨骼：骨骼 0 偏移为 0，其余每根相对父骨骼偏移一个分段宽度
    pub fn new(segments: usize, segment_width: f32) -> Self {
        let mut bones = Vec::with_capacity(segments + 1);
        for i in 0..=segments {
            let mut bone = Bone::new(format!("page_bone_{}", i));
            if i > 0 {
                bone.parent_index = (i - 1) as i32;
                bone.bone_offset = Vec3::new(segment_width, 0.0, 0.0);
            }
            bones.push(bone);
        }

        let mut chain = Self {
            bones,
            skinning_matrices: Vec::new(),
        };
        chain.build_hierarchy();
        chain
    }

    /// 计算静止姿态和逆绑定矩阵
    fn build_hierarchy(&mut self) {
        for bone in &mut self.bones {
            bone.reset_animation();
        }
        self.update_transforms();

        for bone in &mut self.bones {
            bone.inverse_bind_matrix = bone.global_transform.inverse();
        }

        // 初始状态下：skinning_matrix = global * inverse_bind = I
        self.skinning_matrices = vec![Mat4::IDENTITY; self.bones.len()];
        self.end_update();
    }

    /// 获取骨骼数量
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// 获取骨骼
    pub fn get_bone(&self, index: usize) -> Option<&Bone> {
        self.bones.get(index)
    }

    /// 获取可变骨骼引用
    pub fn get_bone_mut(&mut self, index: usize) -> Option<&mut Bone> {
        self.bones.get_mut(index)
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn bones_mut(&mut self) -> &mut [Bone] {
        &mut self.bones
    }

    /// 重置所有骨骼旋转
    pub fn reset_all_transforms(&mut self) {
        for bone in &mut self.bones {
            bone.reset_animation();
        }
    }

    /// 沿链依次更新本地和全局变换
    pub fn update_transforms(&mut self) {
        let mut parent_global = Mat4::IDENTITY;
        for bone in &mut self.bones {
            bone.update_local_transform();
            bone.global_transform = parent_global * bone.local_transform;
            parent_global = bone.global_transform;
        }
    }

    /// 结束更新，刷新蒙皮矩阵
    pub fn end_update(&mut self) {
        for (matrix, bone) in self.skinning_matrices.iter_mut().zip(&self.bones) {
            *matrix = bone.get_skinning_matrix();
        }
    }

    /// 获取蒙皮矩阵数组
    pub fn get_skinning_matrices(&self) -> &[Mat4] {
        &self.skinning_matrices
    }

    /// 获取全局变换
    pub fn get_global_transform(&self, index: usize) -> Mat4 {
        self.bones.get(index).map(|b| b.global_transform).unwrap_or(Mat4::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_is_linear() {
        let chain = BoneChain::new(30, 0.1);
        assert_eq!(chain.bone_count(), 31);
        assert_eq!(chain.get_bone(0).map(|b| b.parent_index), Some(-1));
        for i in 1..chain.bone_count() {
            let bone = chain.get_bone(i).unwrap();
            assert_eq!(bone.parent_index, i as i32 - 1);
            assert!((bone.bone_offset.x - 0.1).abs() < 1e-6);
        }
    }

    #[test]
    fn test_rest_pose_positions() {
        let chain = BoneChain::new(4, 0.25);
        let tip = chain.get_global_transform(4).transform_point3(Vec3::ZERO);
        assert!((tip - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_rest_skinning_is_identity() {
        let chain = BoneChain::new(8, 0.5);
        for m in chain.get_skinning_matrices() {
            assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-5));
        }
    }

    #[test]
    fn test_rotation_propagates_down_chain() {
        let mut chain = BoneChain::new(2, 1.0);
        chain.get_bone_mut(1).unwrap().bend.reset(std::f32::consts::FRAC_PI_2);
        chain.update_transforms();
        chain.end_update();

        // 骨骼 1 位于 x=1，旋转 90° 后骨骼 2 被带到 z 方向
        let tip = chain.get_global_transform(2).transform_point3(Vec3::ZERO);
        assert!((tip - Vec3::new(1.0, 0.0, -1.0)).length() < 1e-5);
    }
}
