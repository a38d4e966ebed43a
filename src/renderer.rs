// Renderer module for raster-demos

use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder},
};
use glam::Vec2;
use std::sync::Arc;
use std::time::Instant;

use crate::config::{window_title, Args, DemoKind, DemoOptions};
use crate::demos::{self, Demo};
use crate::error::GpuError;
use crate::gpu::GpuContext;
use crate::scene::window_to_clip;

pub struct Renderer {
    window: Arc<Window>,
    gpu: GpuContext,
    demo: Box<dyn Demo>,
    options: DemoOptions,
    cursor: Vec2,
    last_frame: Instant,
}

impl Renderer {
    pub async fn new(event_loop: &EventLoop<()>, args: &Args) -> Result<Self, GpuError> {
        let config = args.window();
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(&config.title)
                .with_inner_size(LogicalSize::new(config.width, config.height))
                .build(event_loop)?,
        );

        let gpu = GpuContext::new(window.clone()).await?;
        let options = args.demo_options();
        let demo = demos::create(args.demo, &gpu, &options)?;

        Ok(Self {
            window,
            gpu,
            demo,
            options,
            cursor: Vec2::ZERO,
            last_frame: Instant::now(),
        })
    }

    pub fn run(mut self, event_loop: EventLoop<()>) -> Result<(), winit::error::EventLoopError> {
        event_loop.run(move |event, target| {
            target.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { window_id, event } if window_id == self.window.id() => {
                    match event {
                        WindowEvent::CloseRequested => target.exit(),
                        WindowEvent::Resized(size) => self.gpu.resize(size.width, size.height),
                        WindowEvent::CursorMoved { position, .. } => {
                            self.cursor = Vec2::new(position.x as f32, position.y as f32);
                        }
                        WindowEvent::MouseInput {
                            state: ElementState::Pressed,
                            button: MouseButton::Left,
                            ..
                        } => self.handle_click(),
                        WindowEvent::KeyboardInput { event, .. } => {
                            self.handle_keyboard_input(event, target);
                        }
                        WindowEvent::RedrawRequested => self.redraw(target),
                        _ => {}
                    }
                }
                Event::AboutToWait => {
                    self.window.request_redraw();
                }
                _ => {}
            }
        })
    }

    fn handle_click(&mut self) {
        let size = self.window.inner_size();
        let size = Vec2::new(size.width as f32, size.height as f32);
        if let Some(position) = window_to_clip(self.cursor, size) {
            self.demo.handle_click(&self.gpu, position);
        }
    }

    fn handle_keyboard_input(&mut self, event: KeyEvent, target: &EventLoopWindowTarget<()>) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        if let PhysicalKey::Code(keycode) = event.physical_key {
            match keycode {
                KeyCode::Escape => target.exit(),
                KeyCode::ArrowRight => self.switch_demo(self.demo.kind().next()),
                KeyCode::ArrowLeft => self.switch_demo(self.demo.kind().prev()),
                _ => {}
            }
        }
    }

    fn switch_demo(&mut self, kind: DemoKind) {
        match demos::create(kind, &self.gpu, &self.options) {
            Ok(demo) => {
                self.demo = demo;
                self.window.set_title(&window_title(kind));
            }
            Err(err) => log::error!("failed to start {}: {err}", kind.title()),
        }
    }

    fn redraw(&mut self, target: &EventLoopWindowTarget<()>) {
        match self.update_and_render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory, exiting");
                target.exit();
            }
            Err(wgpu::SurfaceError::Timeout) => log::warn!("surface timeout, skipping frame"),
        }
    }

    fn update_and_render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let elapsed = now - self.last_frame;
        self.last_frame = now;

        self.demo.update(&self.gpu, elapsed);

        let frame = self.gpu.surface.get_current_texture()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        self.demo.prepare(&mut encoder);

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.demo.render(&mut render_pass);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
