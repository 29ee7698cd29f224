mod clock;
mod config;
mod display;
mod frame_loop;
mod log;

use clock::{world_time::WorldTimeApi, ClockState};
use display::{
    screen::Screen,
    text::{self, TrueTypeFace},
};
use frame_loop::Faces;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // --------- ASSETS ---------
    // Missing or broken assets end the program here with a non-zero status.
    println!("{} Loading {}", log::STARTUP, config::BACKGROUND_PATH);
    let background =
        display::load_background(config::BACKGROUND_PATH, config::WIDTH, config::HEIGHT)?;

    println!("{} Loading {}", log::STARTUP, config::FONT_PATH);
    let font = text::load_font(config::FONT_PATH)?;
    let faces = Faces {
        time: TrueTypeFace::new(font.clone(), config::TIME_FONT_SIZE as f32),
        date: TrueTypeFace::new(font, config::DATE_FONT_SIZE as f32),
    };

    // --------- CLOCK ---------
    let service = WorldTimeApi::new(config::TIME_API_URL, config::ZONE)?;
    let state = ClockState::new(clock::now());
    println!(
        "{} Starting at {}, next sync in {:?}",
        log::STARTUP,
        state.current_time.format("%Y-%m-%d %H:%M:%S %:z"),
        config::RESYNC_INTERVAL
    );

    // --------- SCREEN ---------
    let screen = Screen::open(config::WINDOW_TITLE, config::WIDTH, config::HEIGHT);

    frame_loop::run(screen, background, faces, service, state).await;

    Ok(())
}
