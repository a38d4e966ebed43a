// The demo programs
//
// Each demo owns its pipeline, buffers and uniforms; the renderer only
// forwards input and hands over a render pass.

mod points;
mod rotate;
mod textured;
mod triangle;

use std::time::Duration;

use glam::Vec2;

use crate::config::{DemoKind, DemoOptions};
use crate::error::GpuError;
use crate::gpu::GpuContext;

pub trait Demo {
    fn kind(&self) -> DemoKind;

    /// A left click at `position` in clip space.
    fn handle_click(&mut self, _ctx: &GpuContext, _position: Vec2) {}

    /// Called once per frame before any pass is recorded.
    fn update(&mut self, _ctx: &GpuContext, _elapsed: Duration) {}

    /// Record passes that must run before the surface pass.
    fn prepare(&self, _encoder: &mut wgpu::CommandEncoder) {}

    /// Draw into the surface pass, which is already cleared.
    fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>);
}

pub fn create(
    kind: DemoKind,
    ctx: &GpuContext,
    options: &DemoOptions,
) -> Result<Box<dyn Demo>, GpuError> {
    log::info!("starting demo: {}", kind.title());

    let demo: Box<dyn Demo> = match kind {
        DemoKind::Point => Box::new(points::ClickPointDemo::new(ctx)?),
        DemoKind::Triangle => Box::new(triangle::TriangleDemo::new(ctx)?),
        DemoKind::FragCoord => Box::new(triangle::FragCoordDemo::new(ctx)?),
        DemoKind::MultiSizePoint => Box::new(points::MultiSizePointDemo::new(ctx)?),
        DemoKind::MultiColorPoint => Box::new(points::MultiColorPointDemo::new(ctx)?),
        DemoKind::Rotate => Box::new(rotate::RotateDemo::new(ctx)?),
        DemoKind::Transform => Box::new(rotate::TransformDemo::new(ctx)?),
        DemoKind::RotatingTriangle => {
            Box::new(rotate::RotatingTriangleDemo::new(ctx, options.start_angle)?)
        }
        DemoKind::TexturedQuad => Box::new(textured::TexturedQuadDemo::new(ctx, &options.texture)?),
        DemoKind::HueRotate => Box::new(textured::HueRotateDemo::new(
            ctx,
            &options.texture,
            options.start_angle,
        )?),
    };

    debug_assert_eq!(demo.kind(), kind);
    Ok(demo)
}
