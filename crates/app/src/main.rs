//! Entry point for the vitrine3d model loader.
//! Loads each model given on the command line, composes its scene and logs
//! what the rendering backend would receive.

use anyhow::Result;
use asset::texture::{DEFAULT_FILL, DEFAULT_FLAT_NORMAL, TextureData};
use corelib::vec3;
use scene::{FileSource, FitOptions, TextureHandle, TextureResolver, layout, load_scene};

/// Disk-backed texture resolver: PNG files become CPU pixel data awaiting
/// upload; handles index into `loaded`.
struct DiskTextures {
    loaded: Vec<TextureData>,
}

impl DiskTextures {
    fn new() -> Self {
        Self {
            loaded: vec![
                TextureData::solid_rgba8(DEFAULT_FILL),
                TextureData::solid_rgba8(DEFAULT_FLAT_NORMAL),
            ],
        }
    }
}

impl TextureResolver for DiskTextures {
    fn default_color(&self) -> TextureHandle {
        TextureHandle(0)
    }

    fn default_normal(&self) -> TextureHandle {
        TextureHandle(1)
    }

    fn load(&mut self, url: &str) -> Result<TextureHandle> {
        let data = TextureData::load_png(url)?;
        self.loaded.push(data);
        Ok(TextureHandle((self.loaded.len() - 1) as u32))
    }
}

fn parse_f32_flag(prefix: &str, default: f32) -> f32 {
    let mut value = default;
    for arg in std::env::args() {
        if let Some(raw) = arg.strip_prefix(prefix) {
            match raw.parse::<f32>() {
                Ok(parsed) => value = parsed,
                Err(_) => eprintln!("[warn] Ignoring unparseable '{prefix}{raw}'."),
            }
        }
    }
    value
}

fn parse_model_args() -> Vec<String> {
    std::env::args()
        .skip(1)
        .filter(|arg| !arg.starts_with("--"))
        .collect()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let centering = parse_f32_flag("--centering=", 0.5);
    let distance = parse_f32_flag("--distance=", 1.0);
    let aspect = parse_f32_flag("--aspect=", 16.0 / 9.0);
    let models = parse_model_args();
    if models.is_empty() {
        anyhow::bail!("usage: app [--centering=F] [--distance=F] [--aspect=F] <model.obj>...");
    }

    log::info!(
        "Loading {} model(s), centering={centering}, distance={distance}",
        models.len()
    );

    let positions = layout::line_positions(models.len());
    let mut textures = DiskTextures::new();

    for (path, x) in models.iter().zip(positions) {
        let options = FitOptions {
            centering,
            distance_scale: distance,
            aspect,
            target: vec3(layout::clamp_line_position(x), 0.0, 0.0),
            ..FitOptions::default()
        };
        // One bad model must not take the rest of the line down with it.
        let composed = match load_scene(path, &FileSource, &mut textures, &options) {
            Ok(composed) => composed,
            Err(err) => {
                log::error!("failed to load {path}: {:#}", anyhow::Error::new(err));
                continue;
            }
        };

        match &composed.camera {
            Some(camera) => log::info!(
                "{path}: {} part(s), extents {:?}..{:?}, eye {:?}, clip {:.3}..{:.1}",
                composed.parts.len(),
                composed.extents.min,
                composed.extents.max,
                camera.eye,
                camera.z_near,
                camera.z_far
            ),
            None => log::info!("{path}: empty model, nothing to show"),
        }
        for part in &composed.parts {
            log::info!(
                "  part {}: {} vertices, {} position bytes",
                part.name.as_deref().unwrap_or("(unnamed)"),
                part.data.vertex_count(),
                part.data.position_bytes().len()
            );
        }
    }

    log::info!("Done. {} texture(s) staged for upload.", textures.loaded.len());
    Ok(())
}
