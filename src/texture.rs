// Textures and offscreen render targets

use std::path::PathBuf;

use crate::error::TextureError;

/// Where a textured demo gets its pixels from.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureSource {
    /// A generated black and white checkerboard.
    Checkerboard,
    /// An image file decoded with the `image` crate.
    File(PathBuf),
}

/// Tightly packed RGBA8 pixels, bottom row first.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

const CHECKERBOARD_SIZE: u32 = 256;
const CHECKERBOARD_CELL: u32 = 32;

impl TextureSource {
    /// Produce pixel data ready for upload.
    ///
    /// File images are stored top row first, so their rows are flipped to
    /// make texture coordinate `(0, 0)` the bottom-left corner.
    pub fn load(&self) -> Result<RgbaImage, TextureError> {
        match self {
            TextureSource::Checkerboard => Ok(RgbaImage {
                width: CHECKERBOARD_SIZE,
                height: CHECKERBOARD_SIZE,
                pixels: checkerboard(CHECKERBOARD_SIZE, CHECKERBOARD_SIZE, CHECKERBOARD_CELL),
            }),
            TextureSource::File(path) => {
                let decoded = image::open(path)
                    .map_err(|source| TextureError::Image {
                        path: path.clone(),
                        source,
                    })?
                    .to_rgba8();
                let (width, height) = decoded.dimensions();
                let mut pixels = decoded.into_raw();
                flip_rows(&mut pixels, width, height);
                log::info!("loaded image {} ({}x{})", path.display(), width, height);
                Ok(RgbaImage {
                    width,
                    height,
                    pixels,
                })
            }
        }
    }
}

/// Opaque checkerboard; the cell touching the origin is white.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> Vec<u8> {
    let cell = cell.max(1);
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let value = if ((x / cell) + (y / cell)) % 2 == 0 { 255 } else { 0 };
            pixels.extend_from_slice(&[value, value, value, 255]);
        }
    }
    pixels
}

/// Reject sizes the device cannot allocate as a 2D texture.
pub fn check_dimensions(width: u32, height: u32, max: u32) -> Result<(), TextureError> {
    if width == 0 || height == 0 || width > max || height > max {
        return Err(TextureError::Dimensions { width, height, max });
    }
    Ok(())
}

/// Reverse the row order of an RGBA8 buffer in place.
pub fn flip_rows(pixels: &mut [u8], width: u32, height: u32) {
    let row = width as usize * 4;
    let height = height as usize;
    for y in 0..height / 2 {
        let (top, bottom) = pixels.split_at_mut((height - 1 - y) * row);
        top[y * row..(y + 1) * row].swap_with_slice(&mut bottom[..row]);
    }
}

/// A sampled 2D texture with linear filtering and clamp-to-edge wrapping.
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        image: &RgbaImage,
    ) -> Result<Self, TextureError> {
        Self::from_rgba(device, queue, label, image.width, image.height, &image.pixels)
    }

    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<Self, TextureError> {
        check_dimensions(width, height, device.limits().max_texture_dimension_2d)?;

        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(TextureError::Size {
                expected,
                actual: pixels.len(),
            });
        }

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = linear_clamp_sampler(device, label);

        Ok(Self {
            texture,
            view,
            sampler,
        })
    }
}

fn linear_clamp_sampler(device: &wgpu::Device, label: &str) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}

/// An offscreen color target that later passes can sample.
pub struct RenderTarget {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub format: wgpu::TextureFormat,
}

impl RenderTarget {
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = linear_clamp_sampler(device, label);

        Self {
            texture,
            view,
            sampler,
            format,
        }
    }
}

/// Layout for a texture at binding 0 and its sampler at binding 1.
pub fn sampled_texture_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

pub fn sampled_texture_bind_group(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texel(pixels: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * width + x) * 4) as usize;
        [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
    }

    #[test]
    fn checkerboard_alternates_cells() {
        let pixels = checkerboard(8, 8, 2);
        assert_eq!(pixels.len(), 8 * 8 * 4);
        assert_eq!(texel(&pixels, 8, 0, 0), [255, 255, 255, 255]);
        assert_eq!(texel(&pixels, 8, 1, 1), [255, 255, 255, 255]);
        assert_eq!(texel(&pixels, 8, 2, 0), [0, 0, 0, 255]);
        assert_eq!(texel(&pixels, 8, 0, 2), [0, 0, 0, 255]);
        assert_eq!(texel(&pixels, 8, 2, 2), [255, 255, 255, 255]);
    }

    #[test]
    fn checkerboard_zero_cell_does_not_panic() {
        let pixels = checkerboard(2, 1, 0);
        assert_eq!(texel(&pixels, 2, 0, 0), [255, 255, 255, 255]);
        assert_eq!(texel(&pixels, 2, 1, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn flip_rows_reverses_row_order() {
        // 1x3 image, one distinct texel per row
        let mut pixels = vec![1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3];
        flip_rows(&mut pixels, 1, 3);
        assert_eq!(pixels, vec![3, 3, 3, 3, 2, 2, 2, 2, 1, 1, 1, 1]);

        let mut even = vec![1, 1, 1, 1, 9, 9, 9, 9, 2, 2, 2, 2, 8, 8, 8, 8];
        flip_rows(&mut even, 2, 2);
        assert_eq!(even, vec![2, 2, 2, 2, 8, 8, 8, 8, 1, 1, 1, 1, 9, 9, 9, 9]);
    }

    #[test]
    fn dimensions_within_device_limit() {
        assert!(check_dimensions(1, 1, 8192).is_ok());
        assert!(check_dimensions(8192, 8192, 8192).is_ok());
        assert!(check_dimensions(CHECKERBOARD_SIZE, CHECKERBOARD_SIZE, 2048).is_ok());
    }

    #[test]
    fn oversized_or_empty_dimensions_are_rejected() {
        match check_dimensions(8193, 1, 8192) {
            Err(TextureError::Dimensions { width, height, max }) => {
                assert_eq!((width, height, max), (8193, 1, 8192));
            }
            other => panic!("unexpected result {other:?}"),
        }
        assert!(check_dimensions(1, 8193, 8192).is_err());
        assert!(check_dimensions(0, 16, 8192).is_err());
        assert!(check_dimensions(16, 0, 8192).is_err());
    }

    #[test]
    fn checkerboard_source_loads() {
        let image = TextureSource::Checkerboard.load().unwrap();
        assert_eq!(image.width, CHECKERBOARD_SIZE);
        assert_eq!(image.height, CHECKERBOARD_SIZE);
        assert_eq!(image.pixels.len(), (CHECKERBOARD_SIZE * CHECKERBOARD_SIZE * 4) as usize);
    }

    #[test]
    fn missing_file_reports_path() {
        let source = TextureSource::File(PathBuf::from("does/not/exist.png"));
        match source.load() {
            Err(TextureError::Image { path, .. }) => {
                assert_eq!(path, PathBuf::from("does/not/exist.png"))
            }
            other => panic!("unexpected result {other:?}"),
        }
    }
}
