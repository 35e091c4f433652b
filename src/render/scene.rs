//! Course rendering in terms of surface primitives

use crate::constants::*;
use crate::course::Course;
use crate::game::GolfGame;

use bevy::math::DVec2;

use super::surface::{Surface, SurfaceRect};

/// Draw grass, hole and ball, plus the aim line from the ball when present.
pub fn draw_scene(surface: &mut dyn Surface, course: &Course, aim_line_end: Option<DVec2>) {
    surface.clear();

    surface.fill_rect(SurfaceRect::new(0.0, 0.0, course.width, course.height), GRASS_COLOR);

    let hole = course.hole;
    surface.fill_circle(hole.position, hole.radius, HOLE_COLOR);

    if let Some(end) = aim_line_end {
        surface.stroke_line(course.ball.position, end, AIM_LINE_COLOR, AIM_LINE_WIDTH);
    }

    let ball = course.ball;
    surface.fill_circle(ball.position, ball.radius, BALL_FILL_COLOR);
    surface.stroke_circle(ball.position, ball.radius, BALL_OUTLINE_COLOR);
}

/// Draw the current game state
pub fn draw_course(surface: &mut dyn Surface, game: &GolfGame) {
    draw_scene(surface, game.course(), game.aim().line_end());
}
