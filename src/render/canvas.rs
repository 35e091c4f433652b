//! Windowed canvas: a sprite whose texture is re-rasterised from an ImageSurface

use bevy::asset::RenderAssetUsages;
use bevy::math::DVec2;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::constants::*;
use crate::game::{GolfGame, GolfSystems, RedrawRequest};
use crate::settings::GolfSettings;

use super::image_surface::ImageSurface;
use super::scene::draw_course;

/// Marker for the 2D camera that looks at the canvas
#[derive(Component)]
pub struct GolfCamera;

/// Marker for the canvas sprite
#[derive(Component)]
pub struct CourseCanvas;

/// Where the canvas sits in world space
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    pub width: f32,
    pub height: f32,
    /// World-space center of the sprite
    pub center: Vec2,
}

impl CanvasLayout {
    /// Horizontally centered, top edge `CANVAS_TOP_MARGIN` below the window top.
    /// Assumes a default 2D camera at the origin (one world unit per pixel).
    pub fn new(width: f32, height: f32, window_height: f32) -> Self {
        Self {
            width,
            height,
            center: Vec2::new(0.0, window_height / 2.0 - CANVAS_TOP_MARGIN - height / 2.0),
        }
    }

    /// World position to canvas-local pixels (origin top-left, y down)
    pub fn world_to_canvas(&self, world: Vec2) -> DVec2 {
        let left = self.center.x - self.width / 2.0;
        let top = self.center.y + self.height / 2.0;
        DVec2::new((world.x - left) as f64, (top - world.y) as f64)
    }

    pub fn contains(&self, local: DVec2) -> bool {
        local.x >= 0.0 && local.y >= 0.0 && local.x <= self.width as f64 && local.y <= self.height as f64
    }

    /// Distance in window pixels from the window top to the canvas bottom edge
    pub fn bottom_offset(&self) -> f32 {
        CANVAS_TOP_MARGIN + self.height
    }
}

/// CPU-side pixels and the texture they are uploaded into
#[derive(Resource)]
pub struct CanvasTexture {
    pub surface: ImageSurface,
    pub handle: Handle<Image>,
}

/// Draws the course into a window sprite
pub struct CanvasPlugin;

impl Plugin for CanvasPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_canvas)
            .add_systems(Update, redraw_canvas.after(GolfSystems));
    }
}

fn canvas_image(width: u32, height: u32, data: Vec<u8>) -> Image {
    Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}

/// Spawn the camera and the canvas sprite sized to the course
pub fn setup_canvas(
    mut commands: Commands,
    game: Res<GolfGame>,
    settings: Res<GolfSettings>,
    mut images: ResMut<Assets<Image>>,
    mut redraw: ResMut<RedrawRequest>,
) {
    let course = game.course();
    let width = course.width.max(1.0) as u32;
    let height = course.height.max(1.0) as u32;

    let mut surface = ImageSurface::new(width, height);
    draw_course(&mut surface, &game);
    let handle = images.add(canvas_image(width, height, surface.as_raw().to_vec()));

    let layout = CanvasLayout::new(width as f32, height as f32, settings.window_height as f32);
    info!("Canvas {}x{} centered at {:?}", width, height, layout.center);

    commands.spawn((Camera2d, Transform::from_xyz(0.0, 0.0, 0.0), GolfCamera));
    commands.spawn((
        Sprite::from_image(handle.clone()),
        Transform::from_translation(layout.center.extend(0.0)),
        CourseCanvas,
    ));

    commands.insert_resource(layout);
    commands.insert_resource(CanvasTexture { surface, handle });
    // Startup already drew the first frame
    redraw.take();
}

/// Re-rasterise the course when something changed this frame
pub fn redraw_canvas(
    mut redraw: ResMut<RedrawRequest>,
    game: Res<GolfGame>,
    canvas: Option<ResMut<CanvasTexture>>,
    mut images: ResMut<Assets<Image>>,
) {
    let Some(mut canvas) = canvas else {
        return;
    };
    if !redraw.take() {
        return;
    }

    draw_course(&mut canvas.surface, &game);
    let Some(image) = images.get_mut(&canvas.handle) else {
        warn!("Canvas texture missing, skipping redraw");
        return;
    };
    image.data = Some(canvas.surface.as_raw().to_vec());
}
