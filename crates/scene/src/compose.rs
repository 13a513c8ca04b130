//! End-to-end model load: fetch, parse, synthesize, fit, resolve.

use std::collections::HashMap;

use asset::attributes::synthesize_attributes;
use asset::mesh::VertexData;
use asset::{mtl, obj};
use corelib::Vec3;
use corelib::camera::Camera;
use corelib::extents::Extents;
use thiserror::Error;

use crate::material::{Material, TextureHandle, TextureResolver};
use crate::source::{TextSource, resolve_relative};

/// Why a model load was rejected as a unit.
///
/// Parse problems never appear here; parsing degrades to defaults instead of
/// failing. A rejected load leaves whatever scene was displayed before
/// untouched.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch model text from {url}")]
    FetchModel {
        url: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("failed to fetch material library {url}")]
    FetchMaterials {
        url: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("failed to resolve texture {url}")]
    Texture {
        url: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Caller-supplied scene-fitting knobs.
#[derive(Clone, Copy, Debug)]
pub struct FitOptions {
    /// Fraction of the bounding range used to center the model; 0.5 puts
    /// the midpoint at the origin.
    pub centering: f32,
    /// Camera distance as a multiple of the extents diagonal.
    pub distance_scale: f32,
    pub fov_y_rad: f32,
    pub aspect: f32,
    /// Point the camera looks at; products on a cart line each get their
    /// own.
    pub target: Vec3,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            centering: 0.5,
            distance_scale: 1.0,
            fov_y_rad: 60f32.to_radians(),
            aspect: 16.0 / 9.0,
            target: Vec3::ZERO,
        }
    }
}

/// One geometry joined with its resolved material; the unit handed to the
/// rendering backend.
#[derive(Clone, Debug)]
pub struct ScenePart {
    pub name: Option<String>,
    pub material: Material,
    pub data: VertexData,
}

/// Composed output for one loaded model, ready for buffer upload. All parts
/// share one world placement.
#[derive(Clone, Debug)]
pub struct Scene {
    pub parts: Vec<ScenePart>,
    /// World translation that centers the model per
    /// [`FitOptions::centering`].
    pub offset: Vec3,
    /// Absent when the model produced no vertices.
    pub camera: Option<Camera>,
    pub extents: Extents,
}

/// Load one model end to end.
///
/// Every referenced material library is fetched and concatenated before the
/// single material parse: `newmtl` state spans the combined text, so all
/// libraries must be in hand first. One fetch or texture failure rejects the
/// whole load.
pub fn load_scene(
    url: &str,
    source: &dyn TextSource,
    textures: &mut dyn TextureResolver,
    options: &FitOptions,
) -> Result<Scene, LoadError> {
    let text = source.fetch(url).map_err(|e| LoadError::FetchModel {
        url: url.to_string(),
        source: e,
    })?;
    let model = obj::parse_obj(&text);

    let mut material_text = String::new();
    for lib in &model.material_libs {
        let lib_url = resolve_relative(url, lib);
        let text = source
            .fetch(&lib_url)
            .map_err(|e| LoadError::FetchMaterials {
                url: lib_url.clone(),
                source: e,
            })?;
        material_text.push_str(&text);
        material_text.push('\n');
    }
    let materials = mtl::parse_mtl(&material_text);

    let defaults = Material::defaults(textures.default_color(), textures.default_normal());
    let mut cache: HashMap<String, TextureHandle> = HashMap::new();
    let mut extents = Extents::EMPTY;
    let mut parts = Vec::with_capacity(model.geometries.len());

    for mut geometry in model.geometries {
        synthesize_attributes(&mut geometry.data);
        extents = extents.union(Extents::from_positions(&geometry.data.position));

        let parsed = geometry.material.as_deref().and_then(|name| {
            let found = materials.get(name);
            if found.is_none() {
                log::warn!("material '{name}' not found in any library; using defaults");
            }
            found
        });
        let material = match parsed {
            Some(parsed) => defaults.clone().overridden_by(parsed, |map_name| {
                let map_url = resolve_relative(url, map_name);
                if let Some(&handle) = cache.get(&map_url) {
                    return Ok(handle);
                }
                let handle = textures.load(&map_url).map_err(|e| LoadError::Texture {
                    url: map_url.clone(),
                    source: e,
                })?;
                cache.insert(map_url, handle);
                Ok(handle)
            })?,
            None => defaults.clone(),
        };
        parts.push(ScenePart {
            name: geometry.name,
            material,
            data: geometry.data,
        });
    }

    if extents.is_empty() {
        log::info!("model {url} produced no vertices; skipping scene fit");
        return Ok(Scene {
            parts,
            offset: Vec3::ZERO,
            camera: None,
            extents,
        });
    }

    let offset = -(extents.min + extents.range() * options.centering);
    let radius = extents.diagonal() * options.distance_scale;
    let camera = Camera::looking_from_z(options.target, radius, options.fov_y_rad, options.aspect);
    log::info!(
        "loaded {} part(s) from {url}, camera distance {radius:.2}",
        parts.len()
    );

    Ok(Scene {
        parts,
        offset,
        camera: Some(camera),
        extents,
    })
}
