use std::path::{Path, PathBuf};

use log::debug;
use three_d::{CpuTexture, TextureData};

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Loads an image file below `root` into an RGBA texture.
///
/// `reference` is a path relative to `root`, e.g. `earth_hd.jpg`.
pub fn load_texture(root: &Path, reference: &str) -> Result<CpuTexture, AssetError> {
    let path = root.join(reference);
    let bytes = std::fs::read(&path).map_err(|source| AssetError::Io {
        path: path.clone(),
        source,
    })?;
    let texture = decode_texture(&bytes).map_err(|source| AssetError::Decode {
        path: path.clone(),
        source,
    })?;
    debug!(
        "loaded {} ({}x{})",
        path.display(),
        texture.width,
        texture.height
    );
    Ok(CpuTexture {
        name: reference.to_owned(),
        ..texture
    })
}

/// Decodes an encoded image (format guessed from its header).
pub fn decode_texture(bytes: &[u8]) -> Result<CpuTexture, image::ImageError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = image.dimensions();
    let pixels: Vec<[u8; 4]> = image.pixels().map(|p| p.0).collect();
    Ok(CpuTexture {
        data: TextureData::RgbaU8(pixels),
        width,
        height,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba, RgbaImage};

    use super::*;

    fn png_bytes() -> Vec<u8> {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 255, 128]));
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn decodes_png() {
        let texture = decode_texture(&png_bytes()).unwrap();
        assert_eq!((texture.width, texture.height), (2, 1));
        match texture.data {
            TextureData::RgbaU8(pixels) => {
                assert_eq!(pixels, [[255, 0, 0, 255], [0, 0, 255, 128]]);
            }
            _ => panic!("expected RGBA8 data"),
        }
    }

    #[test]
    fn loads_from_asset_root() {
        let root = std::env::temp_dir().join(format!("orrery-assets-{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("dot.png"), png_bytes()).unwrap();

        let texture = load_texture(&root, "dot.png").unwrap();
        assert_eq!(texture.name, "dot.png");
        assert_eq!(texture.width, 2);

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_texture(Path::new("/nonexistent/orrery"), "sun_hd.jpg").unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
        assert!(err.to_string().contains("sun_hd.jpg"));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(decode_texture(b"definitely not an image").is_err());
    }
}
