//! 两骨骼线性混合蒙皮，使用 rayon 按顶点并行

use glam::{Mat4, Vec3};
use rayon::prelude::*;

use crate::model::VertexInfluence;
use super::{SkinningInput, SkinningOutput};

/// 计算蒙皮
pub fn compute_skinning(input: &SkinningInput) -> SkinningOutput {
    let (positions, normals): (Vec<Vec3>, Vec<Vec3>) = input
        .positions
        .par_iter()
        .zip(input.normals.par_iter())
        .zip(input.influences.par_iter())
        .map(|((position, normal), influence)| {
            compute_single_vertex(*position, *normal, influence, input.bone_matrices)
        })
        .unzip();

    SkinningOutput { positions, normals }
}

/// 计算单个顶点的蒙皮
fn compute_single_vertex(
    position: Vec3,
    normal: Vec3,
    influence: &VertexInfluence,
    matrices: &[Mat4],
) -> (Vec3, Vec3) {
    let m0 = get_matrix(matrices, influence.bones[0]);
    let m1 = get_matrix(matrices, influence.bones[1]);
    let [w0, w1] = influence.weights();

    let pos = m0.transform_point3(position) * w0 + m1.transform_point3(position) * w1;
    let norm = (m0.transform_vector3(normal) * w0 + m1.transform_vector3(normal) * w1).normalize_or_zero();
    (pos, norm)
}

fn get_matrix(matrices: &[Mat4], index: usize) -> Mat4 {
    matrices.get(index).copied().unwrap_or(Mat4::IDENTITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn test_blends_between_two_bones() {
        let matrices = [Mat4::IDENTITY, Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0))];
        let influences = [VertexInfluence { bones: [0, 1], weight: 0.25 }];
        let output = compute_skinning(&SkinningInput {
            positions: &[Vec3::X],
            normals: &[Vec3::Z],
            influences: &influences,
            bone_matrices: &matrices,
        });
        assert!((output.positions[0] - Vec3::new(1.0, 0.0, 0.5)).length() < 1e-6);
        assert!((output.normals[0] - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_rotated_bone_moves_vertex() {
        let rotation = Mat4::from_quat(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let influences = [VertexInfluence { bones: [1, 2], weight: 0.0 }];
        let output = compute_skinning(&SkinningInput {
            positions: &[Vec3::X],
            normals: &[Vec3::Z],
            influences: &influences,
            bone_matrices: &[Mat4::IDENTITY, rotation],
        });
        // 骨骼 2 不存在时按单位矩阵处理，但权重为 0
        assert!((output.positions[0] - Vec3::NEG_Z).length() < 1e-5);
        assert!((output.normals[0] - Vec3::X).length() < 1e-5);
    }
}
