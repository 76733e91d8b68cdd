//! Flappy Teddy entry point
//!
//! Native: headless attract-mode runner. Plays `[stage] [level] [seed]` with
//! the autopilot, logging each attempt and saving progress on wins.
//!
//! `FLAPPY_TEDDY_SAVE_DIR` overrides where progress is stored (default: the
//! per-user data directory).

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_teddy::sim::TickInput;
    use flappy_teddy::{Controller, ProgressStore, Screen};

    /// Frames per attempt before giving up (one minute at 60 Hz)
    const MAX_FRAMES: u32 = 60 * 60;
    const ATTEMPTS: u32 = 5;

    flappy_teddy::platform::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (stage, level, seed) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(raw) => {
            log::error!("Invalid argument {raw:?} (usage: flappy-teddy [stage] [level] [seed])");
            std::process::exit(2);
        }
    };

    let save_dir = flappy_teddy::platform::save_dir(std::env::var_os("FLAPPY_TEDDY_SAVE_DIR"));
    log::info!("Saving progress under {}", save_dir.display());
    let store = ProgressStore::platform_default(save_dir);
    let mut ctrl = match seed {
        Some(seed) => Controller::with_seed(store, seed),
        None => Controller::new(store),
    };

    log::info!("Flappy Teddy (native) starting...");
    log::info!("Stars collected so far: {}", ctrl.progress().total_stars());

    ctrl.open_stage_select();
    if !ctrl.select_stage(stage) || !ctrl.start(level) {
        log::error!(
            "Stage {} level {} is not unlocked (max level {})",
            stage,
            level,
            ctrl.progress().max_level(stage)
        );
        std::process::exit(1);
    }

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    for attempt in 1..=ATTEMPTS {
        let generation = ctrl.generation();
        let mut frames = 0;
        while frames < MAX_FRAMES && ctrl.tick_for(generation, &input).is_none() {
            frames += 1;
        }

        if let Some(snapshot) = ctrl.snapshot() {
            println!(
                "attempt {}: {:?} after {} frames, score {}/{}, distance {:.0}",
                attempt,
                snapshot.phase,
                frames,
                snapshot.score,
                snapshot.target_pipes,
                snapshot.distance
            );
        }

        match ctrl.screen() {
            Screen::Ended { points_awarded, .. } if points_awarded > 0 => {
                println!(
                    "won! +{} points, {} stars on this stage",
                    points_awarded,
                    ctrl.progress().stars_for(stage)
                );
                break;
            }
            _ => {
                ctrl.retry();
            }
        }
    }
}

/// `[stage] [level] [seed]`; the offending argument on failure
#[cfg(not(target_arch = "wasm32"))]
fn parse_args(args: &[String]) -> Result<(u8, u8, Option<u64>), String> {
    fn positional<T: std::str::FromStr>(args: &[String], i: usize) -> Result<Option<T>, String> {
        args.get(i)
            .map(|raw| raw.parse::<T>().map_err(|_| raw.clone()))
            .transpose()
    }
    Ok((
        positional(args, 0)?.unwrap_or(0),
        positional(args, 1)?.unwrap_or(1),
        positional(args, 2)?,
    ))
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library's `web` module is the browser entry point
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_without_args() {
        assert_eq!(parse_args(&[]), Ok((0, 1, None)));
    }

    #[test]
    fn test_parses_all_positionals() {
        assert_eq!(parse_args(&args(&["3", "4", "99"])), Ok((3, 4, Some(99))));
    }

    #[test]
    fn test_out_of_range_stage_rejected() {
        assert_eq!(parse_args(&args(&["257"])), Err("257".to_string()));
        assert_eq!(parse_args(&args(&["0", "-1"])), Err("-1".to_string()));
        assert_eq!(parse_args(&args(&["0", "1", "seed"])), Err("seed".to_string()));
    }
}
