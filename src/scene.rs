// Scene state for the demos: clicked points and animated angles

use std::time::Duration;

use glam::{Vec2, Vec4};

use crate::math;

pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
pub const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
pub const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

/// Convert a cursor position in window pixels (origin top-left, y down)
/// to clip space (origin center, y up).
///
/// Returns `None` for an empty window.
pub fn window_to_clip(cursor: Vec2, size: Vec2) -> Option<Vec2> {
    let projection = math::project(0.0, size.x, 0.0, size.y, -1.0, 1.0);
    if !math::is_finite(&projection) {
        return None;
    }
    let clip = projection * Vec4::new(cursor.x, cursor.y, 0.0, 1.0);
    Some(Vec2::new(clip.x, clip.y))
}

/// Red in the first quadrant, green in the third, blue everywhere else.
pub fn quadrant_color(point: Vec2) -> [f32; 4] {
    if point.x > 0.0 && point.y > 0.0 {
        RED
    } else if point.x < 0.0 && point.y < 0.0 {
        GREEN
    } else {
        BLUE
    }
}

/// A point placed by a click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickPoint {
    pub position: Vec2,
    pub color: [f32; 4],
}

/// Every point clicked so far, in click order.
#[derive(Debug, Default)]
pub struct ClickPoints {
    pub points: Vec<ClickPoint>,
}

impl ClickPoints {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Record a click in clip space, coloring it by quadrant.
    pub fn push(&mut self, position: Vec2) -> ClickPoint {
        let point = ClickPoint {
            position,
            color: quadrant_color(position),
        };
        self.points.push(point);
        point
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClickPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Advances an angle at a fixed speed, wrapping below 360 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleAnimator {
    pub degrees_per_second: f32,
}

impl AngleAnimator {
    pub const DEFAULT_STEP: f32 = 60.0;

    pub fn new(degrees_per_second: f32) -> Self {
        Self { degrees_per_second }
    }

    pub fn advance(&self, angle: f32, elapsed: Duration) -> f32 {
        (angle + self.degrees_per_second * elapsed.as_secs_f32()) % 360.0
    }
}

impl Default for AngleAnimator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_clip(cursor: Vec2, size: Vec2, expected: Vec2) {
        let clip = window_to_clip(cursor, size).unwrap();
        assert_relative_eq!(clip.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(clip.y, expected.y, epsilon = 1e-5);
    }

    #[test]
    fn window_center_is_clip_origin() {
        assert_clip(Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0), Vec2::ZERO);
    }

    #[test]
    fn window_corners_map_to_clip_corners() {
        let size = Vec2::new(800.0, 600.0);
        assert_clip(Vec2::new(0.0, 0.0), size, Vec2::new(-1.0, 1.0));
        assert_clip(Vec2::new(800.0, 600.0), size, Vec2::new(1.0, -1.0));
        assert_clip(Vec2::new(600.0, 150.0), size, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn empty_window_has_no_clip_position() {
        assert_eq!(window_to_clip(Vec2::new(10.0, 10.0), Vec2::new(0.0, 600.0)), None);
        assert_eq!(window_to_clip(Vec2::new(10.0, 10.0), Vec2::ZERO), None);
    }

    #[test]
    fn quadrant_colors() {
        assert_eq!(quadrant_color(Vec2::new(0.5, 0.5)), RED);
        assert_eq!(quadrant_color(Vec2::new(-0.5, -0.5)), GREEN);
        assert_eq!(quadrant_color(Vec2::new(-0.5, 0.5)), BLUE);
        assert_eq!(quadrant_color(Vec2::new(0.5, -0.5)), BLUE);
        // Axes belong to neither red nor green
        assert_eq!(quadrant_color(Vec2::new(0.0, 0.5)), BLUE);
        assert_eq!(quadrant_color(Vec2::ZERO), BLUE);
    }

    #[test]
    fn click_points_keep_order() {
        let mut points = ClickPoints::new();
        assert!(points.is_empty());

        points.push(Vec2::new(0.5, 0.5));
        let second = points.push(Vec2::new(-0.25, -0.75));
        assert_eq!(second.color, GREEN);
        assert_eq!(points.len(), 2);

        let colors: Vec<[f32; 4]> = points.iter().map(|p| p.color).collect();
        assert_eq!(colors, vec![RED, GREEN]);
    }

    #[test]
    fn animator_advances_by_speed() {
        let animator = AngleAnimator::default();
        let angle = animator.advance(0.0, Duration::from_millis(500));
        assert_relative_eq!(angle, 30.0, epsilon = 1e-4);
    }

    #[test]
    fn animator_wraps_at_full_turn() {
        let animator = AngleAnimator::new(60.0);
        let angle = animator.advance(350.0, Duration::from_secs(1));
        assert_relative_eq!(angle, 50.0, epsilon = 1e-4);
        assert!(animator.advance(0.0, Duration::from_secs(6)) < 1e-4);
    }
}
