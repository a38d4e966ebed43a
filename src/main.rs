// raster-demos: small GPU rasterization demos

// Module declarations
mod config;
mod demos;
mod error;
mod gpu;
mod logging;
mod math;
mod renderer;
mod scene;
mod texture;
mod vertex;

use anyhow::Context;
use clap::Parser;
use winit::event_loop::EventLoop;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = config::Args::parse();

    // Initialize logging
    logging::init_logging(logging::LoggingConfig {
        env_filter: args.log.clone(),
        ..Default::default()
    });

    // Create event loop
    let event_loop = EventLoop::new().context("failed to create event loop")?;

    // Create renderer
    let renderer = renderer::Renderer::new(&event_loop, &args)
        .await
        .context("failed to initialize renderer")?;

    // Run the renderer
    renderer
        .run(event_loop)
        .context("event loop exited with an error")
}
