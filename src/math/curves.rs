//! 插值与路径采样
//!
//! 路径采样函数返回 `steps + 1` 个点（包含两端），相邻两点构成一段；
//! `steps == 0` 时返回空路径。

use glam::Vec3;
use std::f32::consts::TAU;

/// 三次贝塞尔曲线
pub fn bezier_curve(t: f32, p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Vec3 {
    let u = 1.0 - t;
    let tt = t * t;
    let uu = u * u;
    uu * u * p0 + 3.0 * uu * t * p1 + 3.0 * u * tt * p2 + tt * t * p3
}

/// S 形轨迹上的位置
///
/// 在 `start` → `end` 的线性插值上叠加 Y 方向的正弦扰动。
/// `total_time <= 0` 时视为已到终点。
pub fn s_shape_position(
    time: f32,
    total_time: f32,
    start: Vec3,
    end: Vec3,
    amplitude: f32,
    frequency: f32,
) -> Vec3 {
    let t = if total_time > 0.0 { time / total_time } else { 1.0 };
    let linear = start.lerp(end, t);
    let sine = amplitude * (frequency * t * TAU).sin();
    Vec3::new(linear.x, linear.y + sine, linear.z)
}

/// XY 平面上的圆弧路径（角度单位：度）
pub fn arc_path(center: Vec3, radius: f32, start_angle: f32, end_angle: f32, steps: u32) -> Vec<Vec3> {
    if steps == 0 {
        return Vec::new();
    }
    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let angle = (start_angle + (end_angle - start_angle) * t).to_radians();
            center + Vec3::new(angle.cos(), angle.sin(), 0.0) * radius
        })
        .collect()
}

/// S 形路径
pub fn s_curve_path(start: Vec3, end: Vec3, amplitude: f32, frequency: f32, steps: u32) -> Vec<Vec3> {
    if steps == 0 {
        return Vec::new();
    }
    (0..=steps)
        .map(|i| s_shape_position(i as f32, steps as f32, start, end, amplitude, frequency))
        .collect()
}

/// 贝塞尔螺旋路径
///
/// 以三次贝塞尔曲线为脊线，在 XZ 平面上绕脊线旋转 `turns` 圈，半径从 `radius` 线性收缩到 0。
pub fn spiral_path(control: [Vec3; 4], radius: f32, turns: f32, steps: u32) -> Vec<Vec3> {
    if steps == 0 {
        return Vec::new();
    }
    let [p0, p1, p2, p3] = control;
    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let spine = bezier_curve(t, p0, p1, p2, p3);
            let angle = turns * TAU * t;
            spine + Vec3::new(angle.cos(), 0.0, angle.sin()) * radius * (1.0 - t)
        })
        .collect()
}
