//! # Particle Engine
//!
//! A CPU particle simulation with instanced rendering data, built with Rust.
//!
//! ## Features
//!
//! - **Emitters**: Named spawn configurations with a fixed emission interval
//! - **Effects**: Burst, arc, cannon, slash paths, water, flame, thunder and wind archetypes
//! - **Acceleration Fields**: Axis-aligned wind zones that add to particle velocity
//! - **Instancing**: Fixed-capacity per-frame instance buffer uploaded through wgpu
//! - **ECS Integration**: Particle state as a `bevy_ecs` resource driven by systems
//!
//! ## Architecture Design
//!
//! - **State (Resource)**: `ParticleSystem`, `Time` and `MainCamera` live in the ECS world
//! - **Event**: Discrete `EmitEvent`s replace immediate-mode debug buttons
//! - **System**: `particle_emit_system` then `particle_update_system`, once per frame
//!
//! ### Example
//!
//! ```ignore
//! use particle_engine::render::particles::{EmitEvent, Emitter, ParticleRng, ParticleSystem};
//! use particle_engine::render::Camera;
//!
//! let mut particles = ParticleSystem::new(1024, ParticleRng::seeded(1))?;
//! particles.add_emitter(Emitter::new("main", 3, 0.5)?);
//! particles.emit(&EmitEvent::WaterCalm { spread: 0.5 });
//! particles.advance(1.0 / 60.0, &Camera::default().view());
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Engine loop, errors and ECS resources
//! - [`math`]: Matrix builders and path curves
//! - [`render`]: Camera, particle simulation and instancing
//! - [`config`]: TOML/JSON configuration

/// Core engine functionality including the main engine loop and initialization
pub mod core;
/// Configuration system
pub mod config;
/// Matrix builders and curve sampling
pub mod math;
/// Camera, particle simulation and GPU instancing
pub mod render;
