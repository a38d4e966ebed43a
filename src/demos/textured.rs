// Texture demos: a textured quad, and the same quad recolored offscreen

use std::time::Duration;

use glam::Mat4;

use super::Demo;
use crate::config::DemoKind;
use crate::error::GpuError;
use crate::gpu::{create_pipeline, vertex_buffer, GpuContext, PipelineDesc, UniformBinding};
use crate::math;
use crate::scene::AngleAnimator;
use crate::texture::{
    sampled_texture_bind_group, sampled_texture_layout, RenderTarget, Texture, TextureSource,
};
use crate::vertex::TexturedVertex;

/// Triangle strip; texture coordinate (0, 0) is the bottom-left corner.
const QUAD: [TexturedVertex; 4] = [
    TexturedVertex { position: [-0.5, 0.5], tex_coord: [0.0, 1.0] },
    TexturedVertex { position: [-0.5, -0.5], tex_coord: [0.0, 0.0] },
    TexturedVertex { position: [0.5, 0.5], tex_coord: [1.0, 1.0] },
    TexturedVertex { position: [0.5, -0.5], tex_coord: [1.0, 0.0] },
];

const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// The quad with its texture, drawable into any target format.
struct TexturedQuad {
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    _texture: Texture,
}

impl TexturedQuad {
    fn new(
        ctx: &GpuContext,
        source: &TextureSource,
        format: wgpu::TextureFormat,
    ) -> Result<Self, GpuError> {
        let image = source.load()?;
        let texture = Texture::from_image(&ctx.device, &ctx.queue, "Quad Texture", &image)?;
        log::debug!("quad texture {:?}", texture.texture.size());

        let layout = sampled_texture_layout(&ctx.device, "Quad Texture Layout");
        let bind_group = sampled_texture_bind_group(
            &ctx.device,
            "Quad Texture",
            &layout,
            &texture.view,
            &texture.sampler,
        );

        let pipeline = create_pipeline(
            &ctx.device,
            &PipelineDesc {
                label: "Textured Quad",
                source: include_str!("../shaders/textured.wgsl"),
                vertex_entry: "vs_main",
                fragment_entry: "fs_main",
                buffers: &[TexturedVertex::layout()],
                bind_group_layouts: &[&layout],
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                format,
            },
        )?;

        Ok(Self {
            pipeline,
            vertices: vertex_buffer(&ctx.device, "Quad Vertices", &QUAD),
            bind_group,
            _texture: texture,
        })
    }

    fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.draw(0..QUAD.len() as u32, 0..1);
    }
}

pub struct TexturedQuadDemo {
    quad: TexturedQuad,
}

impl TexturedQuadDemo {
    pub fn new(ctx: &GpuContext, source: &TextureSource) -> Result<Self, GpuError> {
        Ok(Self {
            quad: TexturedQuad::new(ctx, source, ctx.format())?,
        })
    }
}

impl Demo for TexturedQuadDemo {
    fn kind(&self) -> DemoKind {
        DemoKind::TexturedQuad
    }

    fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        self.quad.draw(pass);
    }
}

/// Offscreen size matching the surface, so the composite is not stretched.
fn target_size(viewport: [f32; 2]) -> (u32, u32) {
    ((viewport[0] as u32).max(1), (viewport[1] as u32).max(1))
}

/// An offscreen target plus the bind group that samples it.
struct HueSource {
    target: RenderTarget,
    bind_group: wgpu::BindGroup,
    size: (u32, u32),
}

impl HueSource {
    fn new(ctx: &GpuContext, layout: &wgpu::BindGroupLayout) -> Self {
        let size = target_size(ctx.viewport());
        let target = RenderTarget::new(&ctx.device, "Hue Source", size.0, size.1, TARGET_FORMAT);
        let bind_group = sampled_texture_bind_group(
            &ctx.device,
            "Hue Source",
            layout,
            &target.view,
            &target.sampler,
        );
        log::debug!("hue source target {:?}", target.texture.size());

        Self {
            target,
            bind_group,
            size,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct HueUniform {
    matrix: [[f32; 4]; 4],
}

impl HueUniform {
    fn new(matrix: Mat4) -> Self {
        Self {
            matrix: matrix.to_cols_array_2d(),
        }
    }
}

/// Draws the quad offscreen, then samples that image through
/// [`math::hue_rotate`] while the angle animates.
pub struct HueRotateDemo {
    quad: TexturedQuad,
    source: HueSource,
    source_layout: wgpu::BindGroupLayout,
    pipeline: wgpu::RenderPipeline,
    hue: UniformBinding<HueUniform>,
    animator: AngleAnimator,
    angle: f32,
}

impl HueRotateDemo {
    pub fn new(
        ctx: &GpuContext,
        source: &TextureSource,
        start_angle: f32,
    ) -> Result<Self, GpuError> {
        let source_layout = sampled_texture_layout(&ctx.device, "Hue Source Layout");
        let hue_source = HueSource::new(ctx, &source_layout);
        let quad = TexturedQuad::new(ctx, source, hue_source.target.format)?;

        let hue = UniformBinding::new(
            &ctx.device,
            "Hue Matrix",
            &HueUniform::new(math::hue_rotate(start_angle)),
            wgpu::ShaderStages::FRAGMENT,
        );

        let pipeline = create_pipeline(
            &ctx.device,
            &PipelineDesc {
                label: "Hue Rotate",
                source: include_str!("../shaders/hue.wgsl"),
                vertex_entry: "vs_main",
                fragment_entry: "fs_main",
                buffers: &[],
                bind_group_layouts: &[&source_layout, &hue.layout],
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                format: ctx.format(),
            },
        )?;

        Ok(Self {
            quad,
            source: hue_source,
            source_layout,
            pipeline,
            hue,
            animator: AngleAnimator::default(),
            angle: start_angle,
        })
    }
}

impl Demo for HueRotateDemo {
    fn kind(&self) -> DemoKind {
        DemoKind::HueRotate
    }

    fn update(&mut self, ctx: &GpuContext, elapsed: Duration) {
        if target_size(ctx.viewport()) != self.source.size {
            self.source = HueSource::new(ctx, &self.source_layout);
        }
        self.angle = self.animator.advance(self.angle, elapsed);
        self.hue
            .write(&ctx.queue, &HueUniform::new(math::hue_rotate(self.angle)));
    }

    fn prepare(&self, encoder: &mut wgpu::CommandEncoder) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Hue Source Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.source.target.view,
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
        self.quad.draw(&mut pass);
    }

    fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.source.bind_group, &[]);
        pass.set_bind_group(1, &self.hue.bind_group, &[]);
        pass.draw(0..4, 0..1);
    }
}
