// Point demos: click-placed points and interleaved point buffers

use glam::Vec2;

use super::Demo;
use crate::config::DemoKind;
use crate::error::GpuError;
use crate::gpu::{create_pipeline, vertex_buffer, GpuContext, PipelineDesc, UniformBinding};
use crate::scene::{ClickPoints, RED};
use crate::vertex::{ColoredPoint, SizedPoint};

const POINTS_SHADER: &str = include_str!("../shaders/points.wgsl");

/// Each point is a quad: two triangles, six vertices.
const QUAD_VERTICES: u32 = 6;

/// Size of a clicked point, in pixels.
const CLICK_POINT_SIZE: f32 = 10.0;

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct PointsUniform {
    viewport: [f32; 2],
    _pad: [f32; 2],
    color: [f32; 4],
}

impl PointsUniform {
    fn new(viewport: [f32; 2], color: [f32; 4]) -> Self {
        Self {
            viewport,
            _pad: [0.0; 2],
            color,
        }
    }

    /// For `vs_colored`, which takes color from each point and reads only
    /// the viewport.
    fn viewport_only(viewport: [f32; 2]) -> Self {
        Self::new(viewport, [0.0; 4])
    }
}

fn points_pipeline(
    ctx: &GpuContext,
    label: &str,
    vertex_entry: &str,
    layout: wgpu::VertexBufferLayout<'_>,
    uniform: &UniformBinding<PointsUniform>,
) -> Result<wgpu::RenderPipeline, GpuError> {
    create_pipeline(
        &ctx.device,
        &PipelineDesc {
            label,
            source: POINTS_SHADER,
            vertex_entry,
            fragment_entry: "fs_main",
            buffers: &[layout],
            bind_group_layouts: &[&uniform.layout],
            topology: wgpu::PrimitiveTopology::TriangleList,
            format: ctx.format(),
        },
    )
}

fn points_uniform(ctx: &GpuContext, label: &str, data: PointsUniform) -> UniformBinding<PointsUniform> {
    UniformBinding::new(&ctx.device, label, &data, wgpu::ShaderStages::VERTEX)
}

fn click_instances(points: &ClickPoints) -> Vec<ColoredPoint> {
    points
        .iter()
        .map(|point| ColoredPoint {
            position: point.position.to_array(),
            size: CLICK_POINT_SIZE,
            color: [point.color[0], point.color[1], point.color[2]],
        })
        .collect()
}

/// Click anywhere to add a point; its color depends on the quadrant.
pub struct ClickPointDemo {
    pipeline: wgpu::RenderPipeline,
    uniform: UniformBinding<PointsUniform>,
    points: ClickPoints,
    instances: Option<wgpu::Buffer>,
}

impl ClickPointDemo {
    pub fn new(ctx: &GpuContext) -> Result<Self, GpuError> {
        let uniform = points_uniform(ctx, "Click Points", PointsUniform::viewport_only(ctx.viewport()));
        let pipeline = points_pipeline(
            ctx,
            "Click Points",
            "vs_colored",
            ColoredPoint::point_layout(),
            &uniform,
        )?;

        Ok(Self {
            pipeline,
            uniform,
            points: ClickPoints::new(),
            instances: None,
        })
    }
}

impl Demo for ClickPointDemo {
    fn kind(&self) -> DemoKind {
        DemoKind::Point
    }

    fn handle_click(&mut self, ctx: &GpuContext, position: Vec2) {
        let point = self.points.push(position);
        log::info!(
            "point {} at ({:.3}, {:.3}) color {:?}",
            self.points.len(),
            point.position.x,
            point.position.y,
            point.color
        );

        // Rebuilt on every click; the whole set is redrawn each frame.
        let instances = click_instances(&self.points);
        self.instances = Some(vertex_buffer(&ctx.device, "Click Point Instances", &instances));
    }

    fn update(&mut self, ctx: &GpuContext, _elapsed: std::time::Duration) {
        self.uniform.write(&ctx.queue, &PointsUniform::viewport_only(ctx.viewport()));
    }

    fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        let Some(instances) = &self.instances else {
            return;
        };
        if self.points.is_empty() {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.uniform.bind_group, &[]);
        pass.set_vertex_buffer(0, instances.slice(..));
        pass.draw(0..QUAD_VERTICES, 0..self.points.len() as u32);
    }
}

const SIZED_POINTS: [SizedPoint; 3] = [
    SizedPoint { position: [0.0, 0.5], size: 10.0 },
    SizedPoint { position: [-0.5, -0.5], size: 20.0 },
    SizedPoint { position: [0.5, -0.5], size: 30.0 },
];

/// Three points whose position and size share one interleaved buffer.
pub struct MultiSizePointDemo {
    pipeline: wgpu::RenderPipeline,
    uniform: UniformBinding<PointsUniform>,
    instances: wgpu::Buffer,
}

impl MultiSizePointDemo {
    pub fn new(ctx: &GpuContext) -> Result<Self, GpuError> {
        let uniform = points_uniform(ctx, "Sized Points", PointsUniform::new(ctx.viewport(), RED));
        let pipeline = points_pipeline(
            ctx,
            "Sized Points",
            "vs_sized",
            SizedPoint::layout(),
            &uniform,
        )?;

        Ok(Self {
            pipeline,
            uniform,
            instances: vertex_buffer(&ctx.device, "Sized Point Instances", &SIZED_POINTS),
        })
    }
}

impl Demo for MultiSizePointDemo {
    fn kind(&self) -> DemoKind {
        DemoKind::MultiSizePoint
    }

    fn update(&mut self, ctx: &GpuContext, _elapsed: std::time::Duration) {
        self.uniform.write(&ctx.queue, &PointsUniform::new(ctx.viewport(), RED));
    }

    fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.uniform.bind_group, &[]);
        pass.set_vertex_buffer(0, self.instances.slice(..));
        pass.draw(0..QUAD_VERTICES, 0..SIZED_POINTS.len() as u32);
    }
}

const COLORED_POINTS: [ColoredPoint; 3] = [
    ColoredPoint { position: [0.0, 0.5], size: 10.0, color: [1.0, 0.0, 0.0] },
    ColoredPoint { position: [-0.5, -0.5], size: 20.0, color: [0.0, 1.0, 0.0] },
    ColoredPoint { position: [0.5, -0.5], size: 30.0, color: [0.0, 0.0, 1.0] },
];

/// One `[x, y, size, r, g, b]` buffer read two ways: as triangle corners
/// with interpolated color, and as sized points on top.
pub struct MultiColorPointDemo {
    triangle: wgpu::RenderPipeline,
    points: wgpu::RenderPipeline,
    uniform: UniformBinding<PointsUniform>,
    buffer: wgpu::Buffer,
}

impl MultiColorPointDemo {
    pub fn new(ctx: &GpuContext) -> Result<Self, GpuError> {
        let uniform = points_uniform(ctx, "Colored Points", PointsUniform::viewport_only(ctx.viewport()));
        let points = points_pipeline(
            ctx,
            "Colored Points",
            "vs_colored",
            ColoredPoint::point_layout(),
            &uniform,
        )?;

        let triangle = create_pipeline(
            &ctx.device,
            &PipelineDesc {
                label: "Colored Triangle",
                source: include_str!("../shaders/varying.wgsl"),
                vertex_entry: "vs_main",
                fragment_entry: "fs_main",
                buffers: &[ColoredPoint::corner_layout()],
                bind_group_layouts: &[],
                topology: wgpu::PrimitiveTopology::TriangleList,
                format: ctx.format(),
            },
        )?;

        Ok(Self {
            triangle,
            points,
            uniform,
            buffer: vertex_buffer(&ctx.device, "Colored Points", &COLORED_POINTS),
        })
    }
}

impl Demo for MultiColorPointDemo {
    fn kind(&self) -> DemoKind {
        DemoKind::MultiColorPoint
    }

    fn update(&mut self, ctx: &GpuContext, _elapsed: std::time::Duration) {
        self.uniform.write(&ctx.queue, &PointsUniform::viewport_only(ctx.viewport()));
    }

    fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        let count = COLORED_POINTS.len() as u32;

        pass.set_pipeline(&self.triangle);
        pass.set_vertex_buffer(0, self.buffer.slice(..));
        pass.draw(0..count, 0..1);

        pass.set_pipeline(&self.points);
        pass.set_bind_group(0, &self.uniform.bind_group, &[]);
        pass.set_vertex_buffer(0, self.buffer.slice(..));
        pass.draw(0..QUAD_VERTICES, 0..count);
    }
}
