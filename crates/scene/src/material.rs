//! Resolved shading properties and the texture-resolution seam.

use asset::mtl::MaterialData;

/// Opaque id for a GPU-bound texture, minted by a [`TextureResolver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Turns texture-map filenames into GPU-bound handles.
///
/// Two process-wide defaults stand in whenever a material omits a map: a
/// solid fill for color/specular and a flat +Z normal.
pub trait TextureResolver {
    fn default_color(&self) -> TextureHandle;
    fn default_normal(&self) -> TextureHandle;
    fn load(&mut self, url: &str) -> anyhow::Result<TextureHandle>;
}

/// Fully resolved shading properties for one scene part.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub diffuse: [f32; 3],
    pub ambient: [f32; 3],
    pub specular: [f32; 3],
    pub emissive: [f32; 3],
    pub shininess: f32,
    pub opacity: f32,
    pub diffuse_map: TextureHandle,
    pub specular_map: TextureHandle,
    pub normal_map: TextureHandle,
}

impl Material {
    /// The default bag partially specified materials resolve against.
    pub fn defaults(fill: TextureHandle, flat_normal: TextureHandle) -> Self {
        Self {
            diffuse: [1.0, 1.0, 1.0],
            ambient: [0.0, 0.0, 0.0],
            specular: [1.0, 1.0, 1.0],
            emissive: [0.0, 0.0, 0.0],
            shininess: 200.0,
            opacity: 1.0,
            diffuse_map: fill,
            specular_map: fill,
            normal_map: flat_normal,
        }
    }

    /// Field-by-field override: only fields the material text actually set
    /// replace the defaults. Map filenames go through `resolve` to become
    /// handles.
    pub fn overridden_by<E>(
        mut self,
        parsed: &MaterialData,
        mut resolve: impl FnMut(&str) -> Result<TextureHandle, E>,
    ) -> Result<Self, E> {
        if let Some(v) = parsed.diffuse {
            self.diffuse = v;
        }
        if let Some(v) = parsed.ambient {
            self.ambient = v;
        }
        if let Some(v) = parsed.specular {
            self.specular = v;
        }
        if let Some(v) = parsed.emissive {
            self.emissive = v;
        }
        if let Some(v) = parsed.shininess {
            self.shininess = v;
        }
        if let Some(v) = parsed.opacity {
            self.opacity = v;
        }
        if let Some(name) = &parsed.diffuse_map {
            self.diffuse_map = resolve(name)?;
        }
        if let Some(name) = &parsed.specular_map {
            self.specular_map = resolve(name)?;
        }
        if let Some(name) = &parsed.normal_map {
            self.normal_map = resolve(name)?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILL: TextureHandle = TextureHandle(0);
    const FLAT: TextureHandle = TextureHandle(1);

    fn no_maps(_: &str) -> Result<TextureHandle, ()> {
        panic!("no map fields were set")
    }

    #[test]
    fn partial_override_keeps_unspecified_defaults() {
        let parsed = MaterialData {
            diffuse: Some([0.8, 0.2, 0.2]),
            ..MaterialData::default()
        };
        let resolved = Material::defaults(FILL, FLAT)
            .overridden_by(&parsed, no_maps)
            .unwrap();
        assert_eq!(resolved.diffuse, [0.8, 0.2, 0.2]);
        assert_eq!(resolved.shininess, 200.0);
        assert_eq!(resolved.opacity, 1.0);
        assert_eq!(resolved.normal_map, FLAT);
    }

    #[test]
    fn empty_override_is_the_default_bag() {
        let resolved = Material::defaults(FILL, FLAT)
            .overridden_by(&MaterialData::default(), no_maps)
            .unwrap();
        assert_eq!(resolved, Material::defaults(FILL, FLAT));
    }

    #[test]
    fn map_fields_are_resolved_to_handles() {
        let parsed = MaterialData {
            diffuse_map: Some("brick.png".to_string()),
            ..MaterialData::default()
        };
        let resolved = Material::defaults(FILL, FLAT)
            .overridden_by::<()>(&parsed, |name| {
                assert_eq!(name, "brick.png");
                Ok(TextureHandle(7))
            })
            .unwrap();
        assert_eq!(resolved.diffuse_map, TextureHandle(7));
        assert_eq!(resolved.specular_map, FILL);
    }

    #[test]
    fn failed_map_resolution_aborts_the_override() {
        let parsed = MaterialData {
            normal_map: Some("missing.png".to_string()),
            ..MaterialData::default()
        };
        let result = Material::defaults(FILL, FLAT).overridden_by(&parsed, |_| Err("gone"));
        assert_eq!(result.unwrap_err(), "gone");
    }
}
