//! Shot frame renderer
//!
//! Plays one shot without a window and saves every animation frame as a PNG,
//! drawn with the same scene code the game canvas uses.
//!
//! Usage:
//!   cargo run --bin render-shot -- --angle 30 --club iron --strength 14
//!   cargo run --bin render-shot -- --seed 7 --out assets/shot_frames

use bevy::math::DVec2;
use std::path::PathBuf;

use minigolf::aim::PointerSource;
use minigolf::clubs::Club;
use minigolf::course::Course;
use minigolf::events::EventBus;
use minigolf::game::GolfGame;
use minigolf::render::{ImageSurface, draw_course};
use minigolf::settings::GolfSettings;
use minigolf::swing::{FixedSampler, RandomSampler, SwingSampler, TickOutcome};

struct RenderArgs {
    angle: f64,
    club: Club,
    strength: Option<f64>,
    deviation: f64,
    seed: u64,
    width: f64,
    height: f64,
    out_dir: PathBuf,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            angle: 20.0,
            club: Club::Driver,
            strength: None,
            deviation: 0.0,
            seed: 1,
            width: 800.0,
            height: 600.0,
            out_dir: PathBuf::from("assets/shot_frames"),
        }
    }
}

fn parse_args(args: &[String]) -> Result<RenderArgs, String> {
    let mut parsed = RenderArgs::default();
    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        let number = || -> Result<f64, String> {
            value
                .and_then(|v| v.parse().ok())
                .ok_or_else(|| format!("{} needs a number", args[i]))
        };
        match args[i].as_str() {
            "--angle" => parsed.angle = number()?,
            "--strength" => parsed.strength = Some(number()?),
            "--deviation" => parsed.deviation = number()?,
            "--width" => parsed.width = number()?,
            "--height" => parsed.height = number()?,
            "--seed" => {
                parsed.seed = value
                    .and_then(|v| v.parse().ok())
                    .ok_or_else(|| "--seed needs a non-negative whole number".to_string())?;
            }
            "--club" => {
                parsed.club = value
                    .and_then(|v| Club::from_name(v))
                    .ok_or_else(|| "--club needs driver, iron, hybrid or putter".to_string())?;
            }
            "--out" => {
                parsed.out_dir = value
                    .map(PathBuf::from)
                    .ok_or_else(|| "--out needs a directory".to_string())?;
            }
            "--help" | "-h" => {
                return Err(
                    "render-shot [--angle DEG] [--club NAME] [--strength N] [--deviation DEG] \
                     [--seed N] [--width PX] [--height PX] [--out DIR]"
                        .to_string(),
                );
            }
            other => return Err(format!("Unknown argument '{}'", other)),
        }
        i += 2;
    }
    Ok(parsed)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(2);
        }
    };

    let settings = GolfSettings {
        starting_club: args.club,
        ..GolfSettings::load()
    };
    let mut game = GolfGame::new(Course::new(args.width, args.height), &settings);
    let mut bus = EventBus::disabled();

    // Draw the aim line out of the ball at the requested angle
    let ball = game.ball_position();
    let rad = args.angle.to_radians();
    let end = ball + DVec2::new(rad.cos(), -rad.sin()) * 100.0;
    game.pointer_start(PointerSource::Mouse, ball, &mut bus);
    game.pointer_move(PointerSource::Mouse, end);

    if let Err(e) = std::fs::create_dir_all(&args.out_dir) {
        eprintln!("Failed to create {}: {}", args.out_dir.display(), e);
        std::process::exit(1);
    }

    let mut surface = ImageSurface::new(args.width as u32, args.height as u32);
    let mut save_frame = |game: &GolfGame, frame: u32| {
        draw_course(&mut surface, game);
        let path = args.out_dir.join(format!("frame_{:03}.png", frame));
        if let Err(e) = surface.save(&path) {
            eprintln!("\nFailed to save {}: {}", path.display(), e);
            std::process::exit(1);
        }
        print!("\r  Frame {}", frame);
    };

    // Frame 0 shows the aim line
    save_frame(&game, 0);
    game.pointer_end(PointerSource::Mouse, end, &mut bus);

    let mut sampler: Box<dyn SwingSampler> = match args.strength {
        Some(strength) => Box::new(FixedSampler::new(strength, args.deviation)),
        None => Box::new(
            RandomSampler::seeded(args.seed).with_ranges(settings.strength_range, settings.deviation_range),
        ),
    };
    let shot = match game.swing(sampler.as_mut(), &mut bus) {
        Ok(shot) => shot,
        Err(e) => {
            eprintln!("Swing failed: {}", e);
            std::process::exit(1);
        }
    };
    println!(
        "Shot: {} strength {:.2}, angle {:.2}, distance {:.1} -> ({:.1}, {:.1})",
        game.club(),
        shot.strength,
        shot.final_angle,
        shot.distance,
        shot.target.x,
        shot.target.y
    );

    let mut frame = 1;
    while let Some(outcome) = game.tick(&mut bus) {
        save_frame(&game, frame);
        frame += 1;
        if matches!(outcome, TickOutcome::Finished { .. }) {
            break;
        }
    }

    println!("\nDone! {} frames in {}", frame, args.out_dir.display());
}
