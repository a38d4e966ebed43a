// Single triangle demos: flat color and fragment-position shading

use super::Demo;
use crate::config::DemoKind;
use crate::error::GpuError;
use crate::gpu::{create_pipeline, vertex_buffer, GpuContext, PipelineDesc, UniformBinding};
use crate::scene::RED;
use crate::vertex::{Position, TRIANGLE};

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Material {
    color: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
struct Viewport {
    size: [f32; 2],
    _pad: [f32; 2],
}

pub struct TriangleDemo {
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    material: UniformBinding<Material>,
}

impl TriangleDemo {
    pub fn new(ctx: &GpuContext) -> Result<Self, GpuError> {
        let material = UniformBinding::new(
            &ctx.device,
            "Triangle Material",
            &Material { color: RED },
            wgpu::ShaderStages::FRAGMENT,
        );

        let pipeline = create_pipeline(
            &ctx.device,
            &PipelineDesc {
                label: "Triangle",
                source: include_str!("../shaders/triangle.wgsl"),
                vertex_entry: "vs_main",
                fragment_entry: "fs_main",
                buffers: &[Position::layout()],
                bind_group_layouts: &[&material.layout],
                topology: wgpu::PrimitiveTopology::TriangleList,
                format: ctx.format(),
            },
        )?;

        Ok(Self {
            pipeline,
            vertices: vertex_buffer(&ctx.device, "Triangle Vertices", &TRIANGLE),
            material,
        })
    }
}

impl Demo for TriangleDemo {
    fn kind(&self) -> DemoKind {
        DemoKind::Triangle
    }

    fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.material.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.draw(0..TRIANGLE.len() as u32, 0..1);
    }
}

pub struct FragCoordDemo {
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    viewport: UniformBinding<Viewport>,
    current: Viewport,
}

impl FragCoordDemo {
    pub fn new(ctx: &GpuContext) -> Result<Self, GpuError> {
        let current = Viewport {
            size: ctx.viewport(),
            _pad: [0.0; 2],
        };
        let viewport = UniformBinding::new(
            &ctx.device,
            "Frag Coord Viewport",
            &current,
            wgpu::ShaderStages::FRAGMENT,
        );

        let pipeline = create_pipeline(
            &ctx.device,
            &PipelineDesc {
                label: "Frag Coord",
                source: include_str!("../shaders/frag_coord.wgsl"),
                vertex_entry: "vs_main",
                fragment_entry: "fs_main",
                buffers: &[Position::layout()],
                bind_group_layouts: &[&viewport.layout],
                topology: wgpu::PrimitiveTopology::TriangleList,
                format: ctx.format(),
            },
        )?;

        Ok(Self {
            pipeline,
            vertices: vertex_buffer(&ctx.device, "Frag Coord Vertices", &TRIANGLE),
            viewport,
            current,
        })
    }
}

impl Demo for FragCoordDemo {
    fn kind(&self) -> DemoKind {
        DemoKind::FragCoord
    }

    fn update(&mut self, ctx: &GpuContext, _elapsed: std::time::Duration) {
        let next = Viewport {
            size: ctx.viewport(),
            _pad: [0.0; 2],
        };
        if next != self.current {
            log::debug!("viewport now {:?}", next.size);
            self.viewport.write(&ctx.queue, &next);
            self.current = next;
        }
    }

    fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.viewport.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.draw(0..TRIANGLE.len() as u32, 0..1);
    }
}
