//! 粒子 ECS 系统

use crate::core::resources::Time;
use crate::render::camera::MainCamera;
use crate::render::particles::effects::EmitEvent;
use crate::render::particles::system::ParticleSystem;
use bevy_ecs::prelude::*;

/// 处理本帧的发射事件
pub fn particle_emit_system(mut events: EventReader<EmitEvent>, mut particles: ResMut<ParticleSystem>) {
    for event in events.read() {
        particles.emit(event);
    }
}

/// 发射器计时并更新所有粒子
pub fn particle_update_system(
    time: Res<Time>,
    camera: Res<MainCamera>,
    mut particles: ResMut<ParticleSystem>,
) {
    let view = camera.0.view();
    let instances = particles.advance(time.delta_seconds, &view);

    let stats = particles.stats();
    if stats.culled_by_capacity > 0 {
        tracing::trace!(
            target: "particles",
            "{} particles exceed instance capacity",
            stats.culled_by_capacity
        );
    }
    tracing::trace!(target: "particles", "frame {}: {} instances", time.frame_count, instances);
}
