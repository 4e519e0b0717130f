use crate::data_structures::texture::Texture;

/// Layout of a card face: image view at binding 0, sampler at binding 1.
pub fn image_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
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
        label: Some("card_image_bind_group_layout"),
    })
}

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no browser window"))?;
    let origin = window
        .location()
        .origin()
        .map_err(|_| anyhow::anyhow!("page origin is not readable"))?;
    let base = reqwest::Url::parse(&format!("{}/assets/", origin))?;
    Ok(base.join(file_name)?)
}

/// Read `file_name` from `./assets` (native) or `<origin>/assets` (web).
pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(file_name)?;
        reqwest::get(url).await?.bytes().await?.to_vec()
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = {
        let path = std::path::Path::new("./").join("assets").join(file_name);
        tokio::fs::read(path).await?
    };

    Ok(data)
}

pub async fn load_texture(
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<Texture> {
    let data = load_binary(file_name).await?;
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str());
    Texture::from_bytes(device, queue, &data, file_name, extension)
}

/// Like [`load_texture`], but a missing or undecodable image becomes the
/// checkerboard fallback. A bad image degrades one card, never the app.
pub async fn load_texture_or_fallback(
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> Texture {
    match load_texture(file_name, device, queue).await {
        Ok(texture) => texture,
        Err(e) => {
            log::warn!("Could not load image {}: {}. Using the fallback texture", file_name, e);
            Texture::fallback(device, queue)
        }
    }
}
