//! Application event loop and frame driver.
//!
//! One thread owns the window, the GPU context and the render loop. Each
//! frame is a blocking sequence: poll input, advance the rotation angle from
//! elapsed wall-clock time, write the transform uniform, record one render
//! pass, and present (which blocks on the vsync-paced buffer swap).
//!
//! Startup is all-or-nothing: if asset loading, device creation or shader
//! compilation fails, the loop never runs and [`run`] returns the error so
//! the process exits with a non-zero status.

use std::{iter, sync::Arc};

use cgmath::Vector3;
use instant::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use crate::{
    config::{self, RenderConfig},
    context::Context,
    data_structures::model::Model,
    resources::{self, LoadedAssets},
};

struct App {
    render_config: RenderConfig,
    // Taken by `resumed` when the window exists.
    assets: Option<LoadedAssets>,
    model: Model,
    ctx: Option<Context>,
    start_time: Instant,
    fatal_error: Option<anyhow::Error>,
}

impl App {
    fn new(render_config: RenderConfig, assets: LoadedAssets) -> Self {
        let model = Model::unit_quad(Vector3::new(0.0, 0.0, 0.0), config::QUAD_OFFSET);
        Self {
            render_config,
            assets: Some(assets),
            model,
            ctx: None,
            start_time: Instant::now(),
            fatal_error: None,
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let ctx = match &mut self.ctx {
            Some(ctx) => ctx,
            None => return Ok(()),
        };

        // Degrees per second of wall-clock time, converted to radians.
        let elapsed = self.start_time.elapsed().as_secs_f32();
        let angle = config::ROTATION_SPEED_DEG * elapsed * std::f32::consts::PI / 180.0;
        self.model.set_orientation(config::SPIN_AXIS * angle);
        let model_matrix = self.model.pose_matrix();
        log::trace!("model matrix: {:?}", model_matrix);

        ctx.transforms.uniform.set_model(model_matrix);
        ctx.queue.write_buffer(
            &ctx.transforms.buffer,
            0,
            bytemuck::cast_slice(&[ctx.transforms.uniform]),
        );

        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
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
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&ctx.pipeline);
            render_pass.set_bind_group(0, &ctx.quad.diffuse_bind_group, &[]);
            render_pass.set_bind_group(1, &ctx.transforms.bind_group, &[]);
            render_pass.set_vertex_buffer(0, ctx.quad.vertex_buffer.slice(..));
            render_pass.set_index_buffer(ctx.quad.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..ctx.quad.num_indices, 0, 0..1);
        }

        ctx.queue.submit(iter::once(encoder.finish()));
        output.present();

        ctx.window.request_redraw();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window_attributes = Window::default_attributes()
            .with_title("Spinning Quad")
            .with_inner_size(PhysicalSize::new(
                config::WINDOW_WIDTH,
                config::WINDOW_HEIGHT,
            ))
            .with_resizable(false);

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(error) => {
                self.fatal_error = Some(error.into());
                event_loop.exit();
                return;
            }
        };

        let assets = match self.assets.take() {
            Some(assets) => assets,
            // A second `resumed` after successful init; nothing to do.
            None => return,
        };

        let ctx = pollster::block_on(Context::new(
            window,
            &self.model,
            &assets,
            &self.render_config,
        ));
        match ctx {
            Ok(ctx) => {
                self.start_time = Instant::now();
                self.ctx = Some(ctx);
            }
            Err(error) => {
                self.fatal_error = Some(error);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::RedrawRequested => match self.render() {
                Ok(()) => {}
                // The surface can be lost on its own (e.g. a compositor
                // restart); reconfiguring brings it back.
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    if let Some(ctx) = &self.ctx {
                        ctx.surface.configure(&ctx.device, &ctx.config);
                        ctx.window.request_redraw();
                    }
                }
                Err(error) => {
                    log::error!("unable to render: {error}");
                    self.fatal_error = Some(anyhow::Error::new(error));
                    event_loop.exit();
                }
            },
            _ => {}
        }
    }
}

/// Load assets, run the event loop, and surface any startup failure.
pub fn run(render_config: RenderConfig) -> anyhow::Result<()> {
    let assets = resources::load_assets(&render_config)?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(render_config, assets);
    event_loop.run_app(&mut app)?;

    if let Some(error) = app.fatal_error.take() {
        return Err(error);
    }
    Ok(())
}
