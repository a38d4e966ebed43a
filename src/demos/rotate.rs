// Rotation demos: shader-side rotation, a fixed model matrix, animation

use std::time::Duration;

use glam::{Mat4, Vec2};

use super::Demo;
use crate::config::DemoKind;
use crate::error::GpuError;
use crate::gpu::{create_pipeline, vertex_buffer, GpuContext, PipelineDesc, UniformBinding};
use crate::math::{self, Transform2D};
use crate::scene::{AngleAnimator, RED};
use crate::vertex::{Position, TRIANGLE};

/// Angle used by the static rotation demos, in degrees.
const ANGLE: f32 = 78.0;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
struct RotationUniform {
    cos_b: f32,
    sin_b: f32,
    _pad: [f32; 2],
    color: [f32; 4],
}

impl RotationUniform {
    fn from_degrees(angle: f32, color: [f32; 4]) -> Self {
        let (sin_b, cos_b) = angle.to_radians().sin_cos();
        Self {
            cos_b,
            sin_b,
            _pad: [0.0; 2],
            color,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct ModelUniform {
    matrix: [[f32; 4]; 4],
    color: [f32; 4],
}

impl ModelUniform {
    fn new(matrix: Mat4, color: [f32; 4]) -> Self {
        Self {
            matrix: matrix.to_cols_array_2d(),
            color,
        }
    }
}

/// Rotate-then-translate: the triangle is moved first, then rotated about
/// the origin.
fn transform_matrix() -> Mat4 {
    math::rotate(ANGLE) * math::translate(0.5, 0.0)
}

/// The triangle rotated by cos/sin uniforms in the vertex shader.
pub struct RotateDemo {
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    rotation: UniformBinding<RotationUniform>,
}

impl RotateDemo {
    pub fn new(ctx: &GpuContext) -> Result<Self, GpuError> {
        let rotation = UniformBinding::new(
            &ctx.device,
            "Rotation",
            &RotationUniform::from_degrees(ANGLE, RED),
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );

        let pipeline = create_pipeline(
            &ctx.device,
            &PipelineDesc {
                label: "Rotate",
                source: include_str!("../shaders/rotate.wgsl"),
                vertex_entry: "vs_main",
                fragment_entry: "fs_main",
                buffers: &[Position::layout()],
                bind_group_layouts: &[&rotation.layout],
                topology: wgpu::PrimitiveTopology::TriangleList,
                format: ctx.format(),
            },
        )?;

        Ok(Self {
            pipeline,
            vertices: vertex_buffer(&ctx.device, "Rotate Vertices", &TRIANGLE),
            rotation,
        })
    }
}

impl Demo for RotateDemo {
    fn kind(&self) -> DemoKind {
        DemoKind::Rotate
    }

    fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.rotation.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.draw(0..TRIANGLE.len() as u32, 0..1);
    }
}

/// The triangle drawn through a `mat4x4` model uniform.
struct ModelTriangle {
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    model: UniformBinding<ModelUniform>,
}

impl ModelTriangle {
    fn new(ctx: &GpuContext, label: &str, matrix: Mat4) -> Result<Self, GpuError> {
        let model = UniformBinding::new(
            &ctx.device,
            label,
            &ModelUniform::new(matrix, RED),
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );

        let pipeline = create_pipeline(
            &ctx.device,
            &PipelineDesc {
                label,
                source: include_str!("../shaders/model.wgsl"),
                vertex_entry: "vs_main",
                fragment_entry: "fs_main",
                buffers: &[Position::layout()],
                bind_group_layouts: &[&model.layout],
                topology: wgpu::PrimitiveTopology::TriangleList,
                format: ctx.format(),
            },
        )?;

        Ok(Self {
            pipeline,
            vertices: vertex_buffer(&ctx.device, label, &TRIANGLE),
            model,
        })
    }

    fn set_matrix(&self, queue: &wgpu::Queue, matrix: Mat4) {
        self.model.write(queue, &ModelUniform::new(matrix, RED));
    }

    fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.model.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.draw(0..TRIANGLE.len() as u32, 0..1);
    }
}

pub struct TransformDemo {
    triangle: ModelTriangle,
}

impl TransformDemo {
    pub fn new(ctx: &GpuContext) -> Result<Self, GpuError> {
        Ok(Self {
            triangle: ModelTriangle::new(ctx, "Transform", transform_matrix())?,
        })
    }
}

impl Demo for TransformDemo {
    fn kind(&self) -> DemoKind {
        DemoKind::Transform
    }

    fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        self.triangle.draw(pass);
    }
}

pub struct RotatingTriangleDemo {
    triangle: ModelTriangle,
    animator: AngleAnimator,
    angle: f32,
}

impl RotatingTriangleDemo {
    pub fn new(ctx: &GpuContext, start_angle: f32) -> Result<Self, GpuError> {
        let transform = Transform2D::new(Vec2::ZERO, start_angle, Vec2::ONE);
        Ok(Self {
            triangle: ModelTriangle::new(ctx, "Rotating Triangle", transform.matrix())?,
            animator: AngleAnimator::default(),
            angle: start_angle,
        })
    }
}

impl Demo for RotatingTriangleDemo {
    fn kind(&self) -> DemoKind {
        DemoKind::RotatingTriangle
    }

    fn update(&mut self, ctx: &GpuContext, elapsed: Duration) {
        self.angle = self.animator.advance(self.angle, elapsed);
        let transform = Transform2D::new(Vec2::ZERO, self.angle, Vec2::ONE);
        self.triangle.set_matrix(&ctx.queue, transform.matrix());
    }

    fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        self.triangle.draw(pass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::Vec4;

    // CPU copy of the rotate.wgsl vertex stage
    fn shader_rotate(uniform: &RotationUniform, p: [f32; 2]) -> [f32; 2] {
        [
            p[0] * uniform.cos_b - p[1] * uniform.sin_b,
            p[0] * uniform.sin_b + p[1] * uniform.cos_b,
        ]
    }

    #[test]
    fn shader_rotation_matches_rotate_matrix() {
        let uniform = RotationUniform::from_degrees(ANGLE, RED);
        let matrix = math::rotate(ANGLE);
        for vertex in TRIANGLE {
            let [x, y] = vertex.position;
            let expected = matrix * Vec4::new(x, y, 0.0, 1.0);
            let actual = shader_rotate(&uniform, vertex.position);
            assert_abs_diff_eq!(actual[0], expected.x, epsilon = 1e-6);
            assert_abs_diff_eq!(actual[1], expected.y, epsilon = 1e-6);
        }
    }

    #[test]
    fn transform_translates_before_rotating() {
        // The apex (0, 0.5) moves to (0.5, 0.5) and is then rotated by 78 degrees.
        let apex = transform_matrix() * Vec4::new(0.0, 0.5, 0.0, 1.0);
        let expected = math::rotate(ANGLE) * Vec4::new(0.5, 0.5, 0.0, 1.0);
        assert_abs_diff_eq!(apex.x, expected.x, epsilon = 1e-6);
        assert_abs_diff_eq!(apex.y, expected.y, epsilon = 1e-6);
    }

    #[test]
    fn model_uniform_is_column_major() {
        let uniform = ModelUniform::new(math::translate(3.0, -2.0), RED);
        assert_eq!(uniform.matrix[3], [3.0, -2.0, 0.0, 1.0]);
        assert_eq!(std::mem::size_of::<ModelUniform>(), 80);
        assert_eq!(std::mem::size_of::<RotationUniform>(), 32);
    }
}
