pub mod camera;
pub mod particles;

pub use camera::{Camera, CameraView, MainCamera};

// Re-export Particle System components
pub use particles::{
    EmitEvent, Emitter, GpuInstanceBuffer, ParticleDraw, ParticleInstance, ParticleShape,
    ParticleSystem, ParticleSystemStats,
};
