mod helpers;
mod post;
mod targets;

use crate::constants::{BLOOM_RADIUS, BLOOM_STRENGTH, BLOOM_THRESHOLD, CLEAR_RGB};
use city_core::gpu::{InstanceRaw, SceneUniforms};
use city_core::render::ScenePass;
use post::{PostBindGroups, PostResources};
use targets::RenderTargets;
use web_sys as web;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    time: f32,
    radius: f32,
    blur_dir: [f32; 2],
    bloom_strength: f32,
    threshold: f32,
}

/// WebGPU renderer: instanced city into HDR, then bright/blur/composite.
pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene: ScenePass,
    targets: RenderTargets,
    post: PostResources,
    post_groups: PostBindGroups,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, instance_capacity: usize) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        let targets = RenderTargets::new(&device, width, height);
        let scene = ScenePass::new(&device, RenderTargets::HDR_FORMAT, instance_capacity);
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(city_core::POST_WGSL.into()),
        });
        let post = post::create_post_resources(&device, &post_shader, RenderTargets::HDR_FORMAT, format);
        let post_groups = post.bind_targets(&device, &targets);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene,
            targets,
            post,
            post_groups,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_RGB[0],
                g: CLEAR_RGB[1],
                b: CLEAR_RGB[2],
                a: 1.0,
            },
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
            self.post_groups = self.post.bind_targets(&self.device, &self.targets);
        }
    }

    pub fn render(
        &mut self,
        uniforms: &SceneUniforms,
        instances: &[InstanceRaw],
    ) -> Result<(), wgpu::SurfaceError> {
        self.scene.upload(&self.device, &self.queue, uniforms, instances);
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: city into HDR
        self.scene.draw(
            &mut encoder,
            &self.targets.hdr_view,
            &self.targets.depth_view,
            self.clear_color,
        );

        let (bw, bh) = targets::bloom_size(self.width, self.height);
        let mut pu = PostUniforms {
            resolution: [bw as f32, bh as f32],
            time: uniforms.params[2],
            radius: BLOOM_RADIUS,
            blur_dir: [0.0, 0.0],
            bloom_strength: BLOOM_STRENGTH,
            threshold: BLOOM_THRESHOLD,
        };

        // Each post pass reads the uniform buffer at submit time, so the blur
        // directions go through separate submissions.
        self.queue
            .write_buffer(&self.post.uniform_buffer, 0, bytemuck::bytes_of(&pu));
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post_groups.hdr,
            None,
        );
        self.queue.submit(Some(encoder.finish()));

        let passes: [(&str, [f32; 2], bool); 2] = [("blur_h", [1.0, 0.0], true), ("blur_v", [0.0, 1.0], false)];
        for (label, dir, a_to_b) in passes {
            pu.blur_dir = dir;
            self.queue
                .write_buffer(&self.post.uniform_buffer, 0, bytemuck::bytes_of(&pu));
            let mut encoder = self
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) });
            let (target, source) = if a_to_b {
                (&self.targets.bloom_b_view, &self.post_groups.from_bloom_a)
            } else {
                (&self.targets.bloom_a_view, &self.post_groups.from_bloom_b)
            };
            post::blit(
                &mut encoder,
                label,
                target,
                wgpu::Color::BLACK,
                &self.post.blur_pipeline,
                source,
                None,
            );
            self.queue.submit(Some(encoder.finish()));
        }

        // Final: composite to swapchain
        pu.blur_dir = [0.0, 0.0];
        self.queue
            .write_buffer(&self.post.uniform_buffer, 0, bytemuck::bytes_of(&pu));
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("composite"),
            });
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.post_groups.hdr,
            Some(&self.post_groups.bloom_a_only),
        );
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
