//! 数学工具模块
//!
//! 粒子系统使用的纯函数集合：
//! - `transform` - 变换结构与矩阵构建（缩放、旋转、平移、投影、视口）
//! - `curves` - 插值与路径采样（线性、三次贝塞尔、S 形曲线、圆弧、螺旋）
//!
//! 向量与矩阵本身直接使用 `glam`；逆矩阵与转置使用 `Mat4::inverse` / `Mat4::transpose`。
//!
//! ## 矩阵约定
//!
//! 所有矩阵按行向量约定理解：`v' = v * M`，平移位于第四行，
//! 组合顺序固定为 `Scale * RotateX * RotateY * RotateZ * Translate`。
//! glam 采用列向量约定，同一个矩阵在 glam 中写作 `T * Rz * Ry * Rx * S`，
//! 而它的列主序内存布局与行向量约定下的行主序布局逐字节一致，可以直接上传到 GPU。
//! 需要按行向量顺序书写乘法时使用 [`multiply`]。

pub mod curves;
pub mod transform;

pub use curves::{arc_path, bezier_curve, s_curve_path, s_shape_position, spiral_path};
pub use transform::{
    make_affine_matrix, make_direction_rotation_matrix, make_orthographic_matrix,
    make_perspective_fov_matrix, make_rotate_x_matrix, make_rotate_y_matrix, make_rotate_z_matrix,
    make_rotation_matrix, make_scale_matrix, make_translate_matrix, make_viewport_matrix, multiply, rotation_block,
    transform_direction, Transform,
};
