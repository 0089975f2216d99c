//! Typing Balloon entry point
//!
//! Native: plays a headless demo round with the autoplay typist, records the
//! score and prints the leaderboard.
//! Web: the page drives `typing_balloon::web::WebGame`, nothing to do here.
//!
//! Usage: `typing-balloon [WORDS_JSON] [CATEGORY] [DIFFICULTY]`

/// Reaction height the demo typist starts with
#[cfg(not(target_arch = "wasm32"))]
const DEMO_START_REACTION: f32 = 60.0;
/// The typist gets this much slower after each hit, so the demo ends
#[cfg(not(target_arch = "wasm32"))]
const DEMO_FATIGUE: f32 = 2.5;
/// Hard stop (10 simulated minutes)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_MAX_STEPS: u32 = 12_000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use typing_balloon::highscores::format_date;
    use typing_balloon::sim::{Difficulty, GameEvent};
    use typing_balloon::words::{self, JsonFile};
    use typing_balloon::{Category, Screen, Session, Tuning, platform};

    env_logger::init();
    log::info!("Typing Balloon (native) starting...");

    let mut args = std::env::args().skip(1);
    let words = match args.next() {
        Some(path) => words::load_words(&JsonFile(PathBuf::from(path))),
        None => words::bundled(),
    };
    let category = args
        .next()
        .and_then(|s| Category::from_str(&s))
        .unwrap_or(Category::Animals);
    let difficulty = args
        .next()
        .and_then(|s| Difficulty::from_str(&s))
        .unwrap_or(Difficulty::Normal);

    let seed = platform::now_ms() as u64;
    let mut session = Session::new(words, Tuning::default(), platform::default_storage(), seed);
    session.select_category(category);
    session.select_difficulty(difficulty);
    if !session.start() {
        log::error!("Could not start a round");
        return;
    }

    println!(
        "Demo round: {} / {}",
        category.as_str(),
        difficulty.as_str()
    );

    let mut reaction = DEMO_START_REACTION;
    session.set_autoplay(Some(reaction));
    let mut steps = 0;
    while session.screen() == Screen::Playing && steps < DEMO_MAX_STEPS {
        session.step();
        steps += 1;

        for event in session.drain_events() {
            match event {
                GameEvent::Spawned { id, term } => log::debug!("#{} '{}' appears", id, term),
                GameEvent::Popped {
                    term,
                    translation,
                    points,
                    combo,
                    ..
                } => {
                    if session.settings().show_translations {
                        println!(
                            "  pop  {:<16} {:<24} +{} (combo {})",
                            term, translation, points, combo
                        );
                    } else {
                        println!("  pop  {:<16} +{} (combo {})", term, points, combo);
                    }
                    reaction -= DEMO_FATIGUE;
                    session.set_autoplay(Some(reaction));
                }
                GameEvent::Missed {
                    term, lives_left, ..
                } => println!("  miss {:<16} {} lives left", term, lives_left),
                GameEvent::GameOver { score } => println!("Game over! Final score: {}", score),
            }
        }
    }

    if let Some(round) = session.round() {
        println!(
            "Played {:.1}s, score {}",
            steps as f64 * session.tuning().tick_ms as f64 / 1000.0,
            round.score
        );
    }

    let now = platform::now_ms();
    println!("\nHigh scores:");
    for (i, entry) in session.highscores().entries.iter().enumerate() {
        println!(
            "{:>3}. {:>6}  {:<10} {:<7} {}",
            i + 1,
            entry.score,
            entry.category.map_or("-", |c| c.as_str()),
            entry.difficulty.map_or("-", |d| d.as_str()),
            format_date(entry.timestamp, now)
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
