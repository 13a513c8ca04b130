//! Texture data in CPU-friendly form, ahead of GPU upload.

use std::path::Path;

/// Solid fill used when a material omits a color/specular map.
pub const DEFAULT_FILL: [u8; 4] = [255, 255, 255, 255];
/// Flat +Z normal used when a material omits a normal map.
pub const DEFAULT_FLAT_NORMAL: [u8; 4] = [127, 127, 255, 0];

/// Pixel data before GPU upload.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// Supported texture formats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextureFormat {
    Rgba8,
}

impl TextureData {
    /// Create a new texture with given dimensions and RGBA8 format.
    pub fn new_rgba8(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 4) as usize,
            "Data size doesn't match RGBA8 format"
        );
        Self {
            data,
            width,
            height,
            format: TextureFormat::Rgba8,
        }
    }

    /// 1x1 solid-color texture, the shape of the process-wide default maps.
    pub fn solid_rgba8(color: [u8; 4]) -> Self {
        Self::new_rgba8(1, 1, color.to_vec())
    }

    /// Load texture from PNG file.
    pub fn load_png<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        log::info!("Loading texture from {:?}", path);

        let img = image::open(path)
            .map_err(|e| anyhow::anyhow!("Failed to open image {:?}: {}", path, e))?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let data = rgba.into_raw();

        log::info!("Loaded texture {}x{} with {} bytes", width, height, data.len());

        Ok(Self::new_rgba8(width, height, data))
    }

    /// Get the number of bytes per pixel for the format.
    pub fn bytes_per_pixel(&self) -> u32 {
        match self.format {
            TextureFormat::Rgba8 => 4,
        }
    }

    /// Check if the texture data is valid.
    pub fn is_valid(&self) -> bool {
        let expected_size = (self.width * self.height * self.bytes_per_pixel()) as usize;
        self.data.len() == expected_size && self.width > 0 && self.height > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_fill_is_a_single_valid_pixel() {
        let tex = TextureData::solid_rgba8(DEFAULT_FILL);
        assert_eq!((tex.width, tex.height), (1, 1));
        assert_eq!(tex.data, DEFAULT_FILL.to_vec());
        assert!(tex.is_valid());
    }

    #[test]
    fn flat_normal_points_up_the_z_axis() {
        let tex = TextureData::solid_rgba8(DEFAULT_FLAT_NORMAL);
        // 127/127/255 decodes to roughly (0, 0, 1) in tangent space.
        assert_eq!(tex.data[2], 255);
        assert!(tex.is_valid());
    }

    #[test]
    fn missing_png_is_an_error() {
        assert!(TextureData::load_png("/definitely/not/here.png").is_err());
    }
}
