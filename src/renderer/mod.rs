pub mod canvas;
pub mod pipeline;
pub mod utils;

use std::sync::Arc;

use thiserror::Error;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use canvas::CanvasTexture;
use pipeline::{PresentPipeline, create_present_pipeline};
use utils::letterbox_viewport;

use crate::video::Image;
use crate::window::WindowConfig;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot create a drawing surface for the window")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter found")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create GPU device")]
    Device(#[from] wgpu::RequestDeviceError),
}

/// Shows the game's CPU framebuffer in the window.
///
/// Each frame the framebuffer is uploaded into [`CanvasTexture`] and drawn as
/// one nearest-sampled quad inside the letterboxed viewport; the rest of the
/// window is cleared to black.
pub struct Renderer {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    window_config: WindowConfig,
    pipeline: PresentPipeline,
    canvas: CanvasTexture,
    canvas_bind_group: wgpu::BindGroup,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, window_config: WindowConfig) -> Result<Self, RenderError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(Arc::clone(&window))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats[0];

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = create_present_pipeline(&device, format);
        let canvas = CanvasTexture::new(&device, window_config.canvas_width, window_config.canvas_height);
        let canvas_bind_group = create_canvas_bind_group(&device, &pipeline, &canvas);

        let window_config = WindowConfig {
            physical_width: config.width,
            physical_height: config.height,
            ..window_config
        };

        log::info!(
            "renderer ready: {:?} surface {}x{}, canvas {}x{}",
            format,
            config.width,
            config.height,
            canvas.width,
            canvas.height
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            window_config,
            pipeline,
            canvas,
            canvas_bind_group,
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        self.window_config.physical_width = new_size.width;
        self.window_config.physical_height = new_size.height;
    }

    /// Reconfigure the surface at its current size, e.g. after it was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Change the canvas resolution.  Recreates the canvas texture.
    pub fn resize_canvas(&mut self, width: u32, height: u32) {
        self.canvas = CanvasTexture::new(&self.device, width, height);
        self.canvas_bind_group = create_canvas_bind_group(&self.device, &self.pipeline, &self.canvas);
        self.window_config.canvas_width = self.canvas.width;
        self.window_config.canvas_height = self.canvas.height;
    }

    pub fn window_config(&self) -> &WindowConfig {
        &self.window_config
    }

    /// Upload `framebuffer` and draw one frame.
    pub fn render(&mut self, framebuffer: &Image) -> Result<(), wgpu::SurfaceError> {
        if !self.canvas.matches(framebuffer) {
            self.resize_canvas(framebuffer.width, framebuffer.height);
        }
        self.canvas.upload(&self.queue, framebuffer);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("present_encoder") });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("present_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let viewport = letterbox_viewport(&self.window_config);
            if !viewport.is_empty() {
                pass.set_viewport(viewport.x, viewport.y, viewport.width, viewport.height, 0.0, 1.0);
                pass.set_pipeline(&self.pipeline.render_pipeline);
                pass.set_bind_group(0, &self.canvas_bind_group, &[]);
                pass.draw(0..6, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_canvas_bind_group(
    device: &wgpu::Device,
    pipeline: &PresentPipeline,
    canvas: &CanvasTexture,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("canvas_bg"),
        layout: &pipeline.canvas_bind_group_layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&canvas.texture_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&canvas.sampler),
            },
        ],
    })
}
