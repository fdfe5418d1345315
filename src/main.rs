use std::path::Path;

use anyhow::Context;
use bunbun::{default_registry, BunBunRules};
use bunbun_assets::{AssetStore, FileSource};
use bunbun_engine::{logging, App, Engine, EngineConfig, NullRenderer, Services, SilentAudio};
use log::info;

const CONFIG_PATH: &str = "bunbun.toml";

fn load_config() -> anyhow::Result<EngineConfig> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        EngineConfig::from_file(path).with_context(|| format!("reading {CONFIG_PATH}"))
    } else {
        Ok(EngineConfig::default())
    }
}

fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    logging::init(config.debug_enabled);
    info!(
        "{} {}x{} at {} fps",
        config.title, config.width, config.height, config.fps
    );

    let services = Services {
        assets: Box::new(AssetStore::new(FileSource::new(&config.asset_root))),
        audio: Box::new(SilentAudio::default()),
        renderer: Box::new(NullRenderer::default()),
    };
    let engine = Engine::new(
        config,
        default_registry(),
        services,
        Box::new(BunBunRules),
    );
    App::new(engine).run()
}
