//! Texture and cubemap loading.
//!
//! Asset failures here are never fatal: a missing or undecodable file logs a
//! warning and yields a placeholder (checkerboard for 2D maps, flat color for
//! cubemap faces), so the demo keeps running visually degraded.

pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: (u32, u32),
}

impl Texture {
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        label: &str,
    ) -> Result<Self, String> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| format!("Failed to decode image '{label}': {e}"))?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self::from_rgba8(device, queue, &rgba, width, height, label))
    }

    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pixels: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
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
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            size: (width, height),
        }
    }

    /// Magenta/black checkerboard used wherever a 2D asset failed to load.
    pub fn checkerboard(device: &wgpu::Device, queue: &wgpu::Queue, label: &str) -> Self {
        const SIDE: u32 = 8;
        let mut pixels = Vec::with_capacity((SIDE * SIDE * 4) as usize);
        for y in 0..SIDE {
            for x in 0..SIDE {
                if (x + y) % 2 == 0 {
                    pixels.extend_from_slice(&[255, 0, 255, 255]);
                } else {
                    pixels.extend_from_slice(&[0, 0, 0, 255]);
                }
            }
        }
        Self::from_rgba8(device, queue, &pixels, SIDE, SIDE, label)
    }

    /// Single-pixel solid color, used for flat normal/height placeholder maps.
    pub fn flat_color(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: [u8; 4],
        label: &str,
    ) -> Self {
        Self::from_rgba8(device, queue, &rgba, 1, 1, label)
    }

    /// Load a 2D texture from disk, falling back to the checkerboard on any
    /// read or decode failure.
    pub fn load_or_fallback(device: &wgpu::Device, queue: &wgpu::Queue, path: &str) -> Self {
        match std::fs::read(path) {
            Ok(bytes) => match Self::from_bytes(device, queue, &bytes, path) {
                Ok(texture) => texture,
                Err(err) => {
                    log::warn!("{err}. Falling back to checkerboard.");
                    Self::checkerboard(device, queue, path)
                }
            },
            Err(err) => {
                log::warn!("Failed to read texture '{path}': {err}. Falling back to checkerboard.");
                Self::checkerboard(device, queue, path)
            }
        }
    }
}

pub struct Cubemap {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Cubemap {
    /// Load six faces (+X, -X, +Y, -Y, +Z, -Z order). A face that fails to
    /// read, decode, or match the cubemap dimensions logs and is replaced by
    /// a flat sky color; only the dimensions of the first good face bind the
    /// rest.
    pub fn load(device: &wgpu::Device, queue: &wgpu::Queue, face_paths: &[&str; 6]) -> Self {
        const SKY_FALLBACK: [u8; 4] = [90, 140, 200, 255];

        let decoded: Vec<Option<image::RgbaImage>> = face_paths
            .iter()
            .map(|path| match std::fs::read(path) {
                Ok(bytes) => match image::load_from_memory(&bytes) {
                    Ok(img) => Some(img.to_rgba8()),
                    Err(err) => {
                        log::warn!("Failed to decode cubemap face '{path}': {err}");
                        None
                    }
                },
                Err(err) => {
                    log::warn!("Failed to read cubemap face '{path}': {err}");
                    None
                }
            })
            .collect();

        let (width, height) = decoded
            .iter()
            .flatten()
            .next()
            .map(|img| img.dimensions())
            .unwrap_or((1, 1));

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 6,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Skybox Cubemap"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let flat_face = || {
            let mut pixels = Vec::with_capacity((width * height * 4) as usize);
            for _ in 0..(width * height) {
                pixels.extend_from_slice(&SKY_FALLBACK);
            }
            pixels
        };

        for (layer, (face, path)) in decoded.iter().zip(face_paths).enumerate() {
            let pixels = match face {
                Some(img) if img.dimensions() == (width, height) => img.as_raw().clone(),
                Some(img) => {
                    log::warn!(
                        "Cubemap face '{}' is {}x{}, expected {}x{}. Using flat color.",
                        path,
                        img.width(),
                        img.height(),
                        width,
                        height
                    );
                    flat_face()
                }
                None => flat_face(),
            };
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: layer as u32,
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                &pixels,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * width),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}
