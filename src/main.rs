//! ECS Pong headless entry point
//!
//! Runs the table without a window: both paddles are steered by a simple
//! ball-tracking script, score changes are logged, and the final render
//! list is printed as JSON.
//!
//! Usage: `ecs-pong [settings.json] [frames]`

use std::process::ExitCode;

use ecs_pong::consts::FRAME_DT;
use ecs_pong::sim::{Game, Spatial};
use ecs_pong::{HeldInputs, InputId, Settings};

const DEFAULT_FRAMES: u64 = 600;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("ECS Pong (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load_from(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };
    let frames = match args.next().map(|arg| arg.parse::<u64>()) {
        Some(Ok(frames)) => frames,
        Some(Err(err)) => {
            log::error!("invalid frame count: {err}");
            return ExitCode::FAILURE;
        }
        None => DEFAULT_FRAMES,
    };

    let mut game = match Game::new(settings) {
        Ok(game) => game,
        Err(err) => {
            log::error!("setup failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut last_scores = game.scores();
    for _ in 0..frames {
        let input = track_ball(&game);
        game.tick(&input, FRAME_DT);

        let scores = game.scores();
        if scores != last_scores {
            log::info!(
                "Frame {}: {}",
                game.frames(),
                game.score_label().unwrap_or_default()
            );
            last_scores = scores;
        }
    }

    println!("Final score after {} frames: {} vs {}", game.frames(), last_scores.0, last_scores.1);
    match serde_json::to_string_pretty(&game.render_list()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::warn!("could not serialize render list: {err}"),
    }
    ExitCode::SUCCESS
}

/// Hold up/down on each paddle so its centre chases the ball's centre
fn track_ball(game: &Game) -> HeldInputs {
    let handles = game.handles();
    let world = game.world();
    let mut input = HeldInputs::new();

    let Some(ball) = world.get_component::<Spatial>(handles.ball) else {
        return input;
    };
    let target = ball.position.y + ball.height / 2.0;

    let paddles = [
        (handles.left_paddle, InputId::W, InputId::S),
        (handles.right_paddle, InputId::Up, InputId::Down),
    ];
    for (paddle, up, down) in paddles {
        let Some(spatial) = world.get_component::<Spatial>(paddle) else {
            continue;
        };
        let centre = spatial.position.y + spatial.height / 2.0;
        // Dead zone keeps the paddle from jittering around the target
        if target < centre - 8.0 {
            input.press(up);
        } else if target > centre + 8.0 {
            input.press(down);
        }
    }
    input
}
