mod config;
mod demo;

use anyhow::Result;
use easel_host::Host;

use crate::config::ViewerConfig;

const CONFIG_PATH: &str = "viewer.toml";

fn main() -> Result<()> {
    let cfg = ViewerConfig::load_or_default(CONFIG_PATH)?;
    easel_modules_logging::init(cfg.host.debug);

    let texture = match &cfg.demo.texture_path {
        Some(path) => Some(demo::load_png(path)?),
        None => None,
    };

    let host = Host::new(cfg.host.clone());
    let updater = host.updater();
    let demo_cfg = cfg.demo.clone();

    let host = host.on_screen_ready(move |_screen| {
        if let Some(t) = texture {
            log::info!("showing texture {}", t.size());
            demo::push_once(updater, t);
        } else if demo_cfg.animate {
            log::info!("streaming generated textures every {:?}", demo_cfg.frame_interval());
            if let Err(e) = demo::spawn_producer(updater, demo_cfg.frame_interval()) {
                log::error!("cannot start texture producer: {e}");
            }
        }
    });

    log::info!("starting '{}'", cfg.host.title);
    if let Err(e) = host.run() {
        log::error!("{e}");
        return Err(e.into());
    }
    Ok(())
}
