use crate::constants::INITIAL_INSTANCE_CAPACITY;
use crate::render;
use city_core::gpu::{pack_frame, scene_uniforms, InstanceRaw};
use city_core::{Camera, CityScene, FrameClock, ScrollCell};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub scene: CityScene,
    pub clock: FrameClock,
    pub scroll: ScrollCell,
    pub camera: Camera,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: render::GpuState<'a>,
    pub instances: Vec<InstanceRaw>,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        scene: CityScene,
        scroll: ScrollCell,
        canvas: web::HtmlCanvasElement,
        gpu: render::GpuState<'a>,
    ) -> Self {
        let (w, h) = gpu.size();
        Self {
            scene,
            clock: FrameClock::new(),
            scroll,
            camera: Camera::new(w as f32 / h.max(1) as f32),
            canvas,
            gpu,
            instances: Vec::with_capacity(INITIAL_INSTANCE_CAPACITY),
        }
    }

    pub fn frame(&mut self) {
        let time = self.clock.tick();
        // one scroll read per frame; later events land on the next frame
        let progress = self.scroll.progress();
        let frame = self.scene.step(progress, &time);

        let w = self.canvas.width();
        let h = self.canvas.height();
        self.gpu.resize_if_needed(w, h);
        self.camera.set_viewport(w, h);
        self.camera.set_pose(frame.camera);

        pack_frame(&frame, self.scene.sky(), &mut self.instances);
        let uniforms = scene_uniforms(&self.camera, time.elapsed_sec, false);
        match self.gpu.render(&uniforms, &self.instances) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Timeout) | Err(wgpu::SurfaceError::Outdated) => {
                log::debug!("[gpu] frame skipped");
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
        if time.tick % 600 == 0 {
            log::debug!(
                "[scroll] tick={} progress={:.3} instances={}",
                time.tick,
                frame.progress,
                self.instances.len()
            );
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, INITIAL_INSTANCE_CAPACITY).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
