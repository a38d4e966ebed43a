// Command line and window configuration

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::texture::TextureSource;

/// The demo programs, in the order the arrow keys cycle through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DemoKind {
    /// Click to place points colored by quadrant.
    Point,
    /// A flat red triangle.
    #[default]
    Triangle,
    /// A triangle shaded from its fragment position.
    FragCoord,
    /// Points of different sizes from one interleaved buffer.
    MultiSizePoint,
    /// Points and a triangle colored from one interleaved buffer.
    MultiColorPoint,
    /// A triangle rotated in the vertex shader from cos/sin uniforms.
    Rotate,
    /// A triangle moved by a rotate-then-translate model matrix.
    Transform,
    /// A triangle spinning at a fixed angular speed.
    RotatingTriangle,
    /// A textured quad drawn as a triangle strip.
    TexturedQuad,
    /// A textured quad recolored through a hue rotation matrix.
    HueRotate,
}

impl DemoKind {
    pub const ALL: [DemoKind; 10] = [
        DemoKind::Point,
        DemoKind::Triangle,
        DemoKind::FragCoord,
        DemoKind::MultiSizePoint,
        DemoKind::MultiColorPoint,
        DemoKind::Rotate,
        DemoKind::Transform,
        DemoKind::RotatingTriangle,
        DemoKind::TexturedQuad,
        DemoKind::HueRotate,
    ];

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or_default()
    }

    /// The following demo, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The preceding demo, wrapping around.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn title(self) -> &'static str {
        match self {
            DemoKind::Point => "Point",
            DemoKind::Triangle => "Triangle",
            DemoKind::FragCoord => "Fragment Coordinates",
            DemoKind::MultiSizePoint => "Multi-size Points",
            DemoKind::MultiColorPoint => "Multi-color Points",
            DemoKind::Rotate => "Rotate",
            DemoKind::Transform => "Transform",
            DemoKind::RotatingTriangle => "Rotating Triangle",
            DemoKind::TexturedQuad => "Textured Quad",
            DemoKind::HueRotate => "Hue Rotate",
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "raster-demos", about = "Small GPU rasterization demos")]
pub struct Args {
    /// Demo to start with (arrow keys switch at runtime)
    #[arg(value_enum, default_value_t = DemoKind::Triangle)]
    pub demo: DemoKind,

    /// Image for the textured demos (a checkerboard is used otherwise)
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Starting angle in degrees for the animated demos
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub angle: f32,

    /// Log filter, `env_logger` syntax (overrides RUST_LOG)
    #[arg(long)]
    pub log: Option<String>,
}

impl Args {
    pub fn window(&self) -> WindowConfig {
        WindowConfig {
            title: window_title(self.demo),
            width: self.width.max(1),
            height: self.height.max(1),
        }
    }

    pub fn demo_options(&self) -> DemoOptions {
        DemoOptions {
            texture: match &self.image {
                Some(path) => TextureSource::File(path.clone()),
                None => TextureSource::Checkerboard,
            },
            start_angle: self.angle,
        }
    }
}

/// Initial window settings.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// Settings shared by every demo constructor.
#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub texture: TextureSource,
    pub start_angle: f32,
}

pub fn window_title(kind: DemoKind) -> String {
    format!("raster-demos: {}", kind.title())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["raster-demos"]).unwrap();
        assert_eq!(args.demo, DemoKind::Triangle);
        assert!(args.image.is_none());
        assert_eq!(args.angle, 0.0);
        assert_eq!(
            args.window(),
            WindowConfig {
                title: "raster-demos: Triangle".to_string(),
                width: 800,
                height: 800,
            }
        );
        assert!(matches!(
            args.demo_options().texture,
            TextureSource::Checkerboard
        ));
    }

    #[test]
    fn parses_demo_and_options() {
        let args = Args::try_parse_from([
            "raster-demos",
            "hue-rotate",
            "--image",
            "photo.jpg",
            "--angle",
            "-45",
            "--width",
            "640",
        ])
        .unwrap();
        assert_eq!(args.demo, DemoKind::HueRotate);
        assert_eq!(args.angle, -45.0);
        assert_eq!(args.window().width, 640);

        let options = args.demo_options();
        assert_eq!(options.start_angle, -45.0);
        match options.texture {
            TextureSource::File(path) => assert_eq!(path, PathBuf::from("photo.jpg")),
            other => panic!("unexpected texture source {other:?}"),
        }
    }

    #[test]
    fn kebab_case_names() {
        for (name, kind) in [
            ("point", DemoKind::Point),
            ("frag-coord", DemoKind::FragCoord),
            ("multi-size-point", DemoKind::MultiSizePoint),
            ("multi-color-point", DemoKind::MultiColorPoint),
            ("rotating-triangle", DemoKind::RotatingTriangle),
            ("textured-quad", DemoKind::TexturedQuad),
        ] {
            let args = Args::try_parse_from(["raster-demos", name]).unwrap();
            assert_eq!(args.demo, kind);
        }
        assert!(Args::try_parse_from(["raster-demos", "cube"]).is_err());
    }

    #[test]
    fn cycling_wraps() {
        assert_eq!(DemoKind::Point.prev(), DemoKind::HueRotate);
        assert_eq!(DemoKind::HueRotate.next(), DemoKind::Point);

        let mut kind = DemoKind::Triangle;
        for _ in 0..DemoKind::ALL.len() {
            kind = kind.next();
        }
        assert_eq!(kind, DemoKind::Triangle);
        assert_eq!(DemoKind::Rotate.next().prev(), DemoKind::Rotate);
    }

    #[test]
    fn zero_window_size_is_clamped() {
        let args = Args::try_parse_from(["raster-demos", "--width", "0", "--height", "0"]).unwrap();
        let window = args.window();
        assert_eq!((window.width, window.height), (1, 1));
    }
}
