use city_core::gpu::{pack_frame, scene_uniforms, InstanceRaw};
use city_core::render::{create_depth_texture, ScenePass};
use city_core::{hex_rgb, Camera, CityScene, FrameClock, SceneConfig, ScrollCell, SpinMode, FOG_COLOR};
use winit::event::{ElementState, Event, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

// The desktop window has no page, so scrolling moves through a virtual one
// this many viewports tall.
const VIRTUAL_PAGE_SCREENS: f64 = 5.0;
// Pixels scrolled per wheel line and per arrow key press
const LINE_SCROLL_PX: f64 = 60.0;

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene_pass: ScenePass,
    depth: (wgpu::Texture, wgpu::TextureView),
    clear_color: wgpu::Color,
    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window, instance_capacity: usize) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        log::info!("[gpu] {} {}x{} {:?}", adapter.get_info().name, width, height, format);

        // No bloom chain here: the scene pass tonemaps straight to the surface
        let scene_pass = ScenePass::new(&device, format, instance_capacity);
        let depth = create_depth_texture(&device, width, height);
        let fog = hex_rgb(FOG_COLOR);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            scene_pass,
            depth,
            clear_color: wgpu::Color {
                r: fog.x as f64,
                g: fog.y as f64,
                b: fog.z as f64,
                a: 1.0,
            },
            width,
            height,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth = create_depth_texture(&self.device, self.width, self.height);
    }

    fn render(
        &mut self,
        uniforms: &city_core::gpu::SceneUniforms,
        instances: &[InstanceRaw],
    ) -> Result<(), wgpu::SurfaceError> {
        self.scene_pass
            .upload(&self.device, &self.queue, uniforms, instances);
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        self.scene_pass
            .draw(&mut encoder, &view, &self.depth.1, self.clear_color);
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Scene layout from `CITY_SEED` (reproducible) or entropy, spin timing from
/// `CITY_SPIN` (`per-second` or the default per-tick).
fn scene_from_env() -> CityScene {
    let spin_mode = match std::env::var("CITY_SPIN").as_deref() {
        Ok("per-second") => SpinMode::PerSecond,
        _ => SpinMode::PerTick,
    };
    let config = SceneConfig {
        spin_mode,
        ..SceneConfig::default()
    };
    match std::env::var("CITY_SEED").ok().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => {
            log::info!("[field] seed={}", seed);
            CityScene::new(config, seed)
        }
        Some(Err(e)) => {
            log::warn!("[field] ignoring CITY_SEED: {}", e);
            CityScene::from_entropy(config)
        }
        None => CityScene::from_entropy(config),
    }
}

fn set_virtual_extent(scroll: &ScrollCell, viewport_height: u32) {
    let viewport = viewport_height.max(1) as f64;
    scroll.set_extent(viewport * VIRTUAL_PAGE_SCREENS, viewport);
}

fn key_scroll_delta(key: &Key, viewport_height: u32) -> Option<f64> {
    let page = viewport_height as f64;
    match key {
        Key::Named(NamedKey::ArrowDown) => Some(LINE_SCROLL_PX),
        Key::Named(NamedKey::ArrowUp) => Some(-LINE_SCROLL_PX),
        Key::Named(NamedKey::PageDown) | Key::Named(NamedKey::Space) => Some(page),
        Key::Named(NamedKey::PageUp) => Some(-page),
        Key::Named(NamedKey::End) => Some(f64::MAX / 4.0),
        Key::Named(NamedKey::Home) => Some(f64::MIN / 4.0),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut scene = scene_from_env();
    let scroll = ScrollCell::new();
    let mut clock = FrameClock::new();
    let mut instances: Vec<InstanceRaw> = Vec::new();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Cosmic City (native)")
        .build(&event_loop)?;

    let capacity = city_core::gpu::instance_count(scene.field().len(), scene.sky());
    let mut state = pollster::block_on(GpuState::new(&window, capacity))?;
    let mut camera = Camera::new(state.width as f32 / state.height as f32);
    set_virtual_extent(&scroll, state.height);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => {
            state.resize(size);
            set_virtual_extent(&scroll, state.height);
        }
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event: WindowEvent::MouseWheel { delta, .. },
            ..
        } => {
            // wheel down reports negative y; page offset grows downward
            let dy = match delta {
                MouseScrollDelta::LineDelta(_, y) => y as f64 * LINE_SCROLL_PX,
                MouseScrollDelta::PixelDelta(pos) => pos.y,
            };
            scroll.scroll_by(-dy);
        }
        Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                },
            ..
        } => {
            if let Key::Named(NamedKey::Escape) = logical_key {
                elwt.exit();
            } else if let Some(dy) = key_scroll_delta(&logical_key, state.height) {
                scroll.scroll_by(dy);
            }
        }
        Event::AboutToWait => {
            let time = clock.tick();
            let frame = scene.step(scroll.progress(), &time);
            camera.set_viewport(state.width, state.height);
            camera.set_pose(frame.camera);
            pack_frame(&frame, scene.sky(), &mut instances);
            let uniforms = scene_uniforms(&camera, time.elapsed_sec, true);
            match state.render(&uniforms, &instances) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::debug!("[gpu] frame skipped: {:?}", e),
            }
        }
        _ => {}
    })?;
    Ok(())
}
