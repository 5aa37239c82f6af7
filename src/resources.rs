//! Asset loading helpers.
//!
//! All file I/O happens here, before the event loop starts, so a missing or
//! unreadable path fails the program without ever opening a render pass.

use std::fs;
use std::path::Path;

use image::GenericImageView;

use crate::config::RenderConfig;
use crate::error::StartupError;

/// Assets read and decoded up front: shader sources and the quad texture.
#[derive(Debug)]
pub struct LoadedAssets {
    pub vertex_shader_source: String,
    pub fragment_shader_source: String,
    pub texture_image: image::DynamicImage,
}

/// Read both shader sources and decode the texture image.
pub fn load_assets(config: &RenderConfig) -> Result<LoadedAssets, StartupError> {
    let vertex_shader_source = load_shader_source(&config.vertex_shader_path)?;
    let fragment_shader_source = load_shader_source(&config.fragment_shader_path)?;

    let bytes = fs::read(&config.texture_path).map_err(|source| StartupError::TextureRead {
        path: config.texture_path.clone(),
        source,
    })?;
    let texture_image =
        image::load_from_memory(&bytes).map_err(|source| StartupError::TextureDecode {
            path: config.texture_path.clone(),
            source,
        })?;
    let dimensions = texture_image.dimensions();
    log::info!(
        "loaded texture {} ({}x{})",
        config.texture_path.display(),
        dimensions.0,
        dimensions.1
    );

    Ok(LoadedAssets {
        vertex_shader_source,
        fragment_shader_source,
        texture_image,
    })
}

fn load_shader_source(path: &Path) -> Result<String, StartupError> {
    fs::read_to_string(path).map_err(|source| StartupError::ShaderRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Bind group layout for the quad's diffuse texture and sampler (group 0).
pub fn diffuse_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
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
        label: Some("diffuse_bind_group_layout"),
    })
}
