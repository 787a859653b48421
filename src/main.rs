use particle_engine::config::EngineConfig;
use particle_engine::core::Engine;

fn main() {
    let mut config = EngineConfig::load_or_default();
    config.apply_env_overrides();

    if let Err(e) = Engine::run(config) {
        eprintln!("Engine failed: {}", e);
        std::process::exit(1);
    }
}
