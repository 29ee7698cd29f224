use debug_print::debug_println;
use image::RgbaImage;
use tokio::time::MissedTickBehavior;

use crate::{
    clock::{self, world_time::TimeService, ClockState, SyncOutcome, ZonedTime},
    config::{self, Layout},
    display::{
        blit_centered,
        screen::Screen,
        text::{render_layered, Typeface},
    },
    log,
};

pub struct Faces<T: Typeface> {
    pub time: T,
    pub date: T,
}

/// Resync if due, then move the clock on by one tick.
///
/// A tick that just took a fresh time from the network shows it as fetched.
pub async fn update_clock<S: TimeService>(
    state: &mut ClockState,
    now: ZonedTime,
    service: &S,
) -> SyncOutcome {
    let outcome = state.maybe_resync(now, service).await;
    if outcome != SyncOutcome::Synced {
        state.advance();
    }
    outcome
}

/// Background with the time and date blocks on top.
pub fn compose_frame<T: Typeface>(
    background: &RgbaImage,
    state: &ClockState,
    faces: &Faces<T>,
    layout: &Layout,
) -> RgbaImage {
    let mut frame = background.clone();

    let time_text = state.time_text();
    let date_text = state.date_text();
    debug_println!("drawing {} / {}", time_text, date_text);

    let time = render_layered(&time_text, &faces.time, config::COLOR_FILL, config::COLOR_OUTLINE);
    let date = render_layered(&date_text, &faces.date, config::COLOR_FILL, config::COLOR_OUTLINE);

    blit_centered(&mut frame, &time, layout.time_position);
    blit_centered(&mut frame, &date, layout.date_position);

    frame
}

/// Runs until the window is closed. Nothing in here can fail.
pub async fn run<S: TimeService, T: Typeface>(
    mut screen: Screen,
    background: RgbaImage,
    faces: Faces<T>,
    service: S,
    mut state: ClockState,
) {
    let mut interval = tokio::time::interval(config::TICK);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick completes immediately
    interval.tick().await;

    // The window has to be shown once before it delivers events.
    screen.present(&background);

    loop {
        if screen.quit_requested() {
            println!("{} Quit requested, closing window", log::SCREEN);
            drop(screen);
            return;
        }

        update_clock(&mut state, clock::now(), &service).await;

        let frame = compose_frame(&background, &state, &faces, &config::LAYOUT);
        screen.present(&frame);
        debug_println!("{} presented {}", log::SCREEN, state.time_text());

        interval.tick().await;
    }
}
