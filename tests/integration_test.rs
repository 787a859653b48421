use bevy_ecs::prelude::*;
use glam::{Vec3, Vec4};
use particle_engine::config::{BlendMode, EngineConfig, ScheduledEmit};
use particle_engine::core::{Engine, Time};
use particle_engine::math::rotation_block;
use particle_engine::render::camera::{Camera, CameraView, MainCamera};
use particle_engine::render::particles::*;

fn seeded_system(capacity: u32) -> ParticleSystem {
    ParticleSystem::new(capacity, ParticleRng::seeded(2024)).unwrap()
}

#[test]
fn test_ecs_integration() {
    let mut world = World::default();
    world.insert_resource(Time::default());
    world.insert_resource(MainCamera::default());
    world.insert_resource(seeded_system(256));
    world.init_resource::<Events<EmitEvent>>();

    let mut schedule = Schedule::default();
    schedule.add_systems((particle_emit_system, particle_update_system).chain());

    world.send_event(EmitEvent::FlameUnknowing { spread: 0.5 });
    world.resource_mut::<Time>().advance(1.0 / 60.0);
    schedule.run(&mut world);
    world.resource_mut::<Events<EmitEvent>>().update();

    let particles = world.resource::<ParticleSystem>();
    assert_eq!(particles.particle_count(), 3);
    assert_eq!(particles.instances().count(), 3);
}

#[test]
fn test_full_particle_lifecycle() {
    let mut system = seeded_system(64);
    system.add_emitter(Emitter::new("main", 4, 0.5).unwrap());
    let camera = Camera::default().view();

    // 2 秒内发射 4 次，每次 4 个
    let dt = 1.0 / 64.0;
    for _ in 0..128 {
        system.advance(dt, &camera);
    }
    assert_eq!(system.stats().total_emitted, 16);

    // 停止自动发射后，所有粒子最终到期
    system.settings_mut().continuous_emission = false;
    for _ in 0..(64 * 6) {
        system.advance(dt, &camera);
    }
    assert_eq!(system.particle_count(), 0);
    assert_eq!(system.instances().count(), 0);
}

#[test]
fn test_wind_zone_pushes_particles() {
    let mut system = seeded_system(64);
    let area = Aabb::new(Vec3::splat(-10.0), Vec3::splat(10.0)).unwrap();
    system.add_field(AccelerationField::new(area, Vec3::new(0.5, 0.0, 0.0)));
    system.push_particle(Particle::new(Vec3::ZERO, Vec3::ZERO, Vec4::ONE, 100.0));

    let camera = CameraView::IDENTITY;
    for _ in 0..4 {
        system.update(0.25, &camera);
    }
    let particle = system.particles()[0];
    assert_eq!(particle.velocity, Vec3::new(2.0, 0.0, 0.0));
    // 速度在第 n 帧使用前 n-1 帧累加的结果
    assert_eq!(particle.transform.translate, Vec3::new(0.75, 0.0, 0.0));
}

#[test]
fn test_billboard_faces_camera() {
    let mut camera = Camera::default();
    camera.transform.rotate = Vec3::new(0.2, 1.1, 0.0);

    let mut system = seeded_system(8);
    system.emit(&EmitEvent::Burst);
    system.update(0.0, &camera.view());

    let expected = rotation_block(&camera.world_matrix());
    for instance in system.instances().as_slice() {
        assert!(rotation_block(&instance.world_matrix()).abs_diff_eq(expected, 1e-5));
    }
}

#[test]
fn test_scripted_engine_run() {
    let mut config = EngineConfig::default();
    config.render.use_gpu = false;
    config.render.blend_mode = BlendMode::Screen;
    config.simulation.random_seed = Some(5);
    config.simulation.continuous_emission = false;
    config.demo.frames = 10;
    config.demo.stats_interval = 0;
    config.demo.script = vec![
        ScheduledEmit {
            frame: 2,
            event: EmitEvent::Burst,
        },
        ScheduledEmit {
            frame: 5,
            event: EmitEvent::Slash {
                radius: 1.0,
                start_angle: 0.0,
                end_angle: 90.0,
                steps: 10,
                spread: 0.1,
            },
        },
    ];

    let report = Engine::run(config).unwrap();
    assert_eq!(report.final_stats.total_emitted, 3 + 10);
    assert_eq!(report.peak_alive, 13);
    assert_eq!(report.draw_calls, 8);
}

#[test]
fn test_config_file_drives_engine() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("particles.toml");
    std::fs::write(
        &path,
        r#"
[simulation]
max_instances = 4
random_seed = 1
continuous_emission = false

[render]
use_gpu = false

[demo]
frames = 3
stats_interval = 0
fields = []

[[demo.script]]
frame = 0
event = { kind = "wind_storm", spread = 1.0 }
"#,
    )?;

    let config = EngineConfig::from_toml_file(&path)?;
    let report = Engine::run(config)?;
    assert_eq!(report.final_stats.alive_count, 3);
    assert_eq!(report.final_stats.instance_count, 3);
    Ok(())
}
