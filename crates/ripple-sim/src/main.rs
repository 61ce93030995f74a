use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Context};
use glam::Vec2;
use ripple_core::{
    normalize_key, CellVisuals, Config, CursorFrame, MagneticController, MagneticTargets,
    OrientationState, Rect, RippleEngine, Session,
};

const VIEWPORT: Vec2 = Vec2::new(1000.0, 600.0);
const FRAME: Duration = Duration::from_micros(16_667);
const PRINT_EVERY_FRAMES: u32 = 6; // ~100 ms between printed frames
const DEFAULT_SEED: u64 = 42;

// progress ramp used for the ASCII grid, hidden to fully visible
const RAMP: &[u8] = b" .:oO#";

#[derive(Clone, Copy, Debug)]
enum Action {
    Click(Vec2),
    Pointer(Vec2),
    Press(bool),
    Resize(Vec2),
}

struct Step {
    at: Duration,
    action: Action,
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Two overlapping ripples, a resize mid-animation, and a pointer that
/// sweeps across the nav targets.
fn script() -> Vec<Step> {
    use Action::*;
    [
        (0, Pointer(Vec2::new(40.0, 40.0))),
        (100, Click(Vec2::new(120.0, 80.0))),
        (400, Pointer(Vec2::new(150.0, 32.0))),
        (450, Press(true)),
        (520, Press(false)),
        (700, Click(Vec2::new(880.0, 520.0))),
        (900, Pointer(Vec2::new(500.0, 300.0))),
        (2600, Pointer(Vec2::new(312.0, 36.0))),
        (3200, Pointer(Vec2::new(600.0, 400.0))),
        (3400, Click(Vec2::new(500.0, 300.0))),
        (3700, Resize(Vec2::new(1400.0, 800.0))),
        (4000, Click(Vec2::new(1399.0, 0.0))),
    ]
    .into_iter()
    .map(|(t, action)| Step { at: ms(t), action })
    .collect()
}

fn nav_targets() -> MagneticTargets {
    [
        Rect::new(100.0, 20.0, 90.0, 28.0),
        Rect::new(260.0, 20.0, 90.0, 28.0),
        Rect::new(420.0, 20.0, 90.0, 28.0),
    ]
    .into_iter()
    .collect()
}

struct Args {
    config: Config,
    seed: u64,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Args> {
    let mut config = Config::default();
    let mut seed = DEFAULT_SEED;
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            bail!("expected KEY=VALUE, got `{arg}`");
        };
        if normalize_key(key) == "seed" {
            seed = value
                .trim()
                .parse()
                .with_context(|| format!("invalid seed `{value}`"))?;
            continue;
        }
        config
            .apply_override(key, value)
            .with_context(|| format!("rejected override `{arg}`"))?;
    }
    Ok(Args { config, seed })
}

fn render_grid(engine: &RippleEngine, visuals: &CellVisuals) -> String {
    let shape = engine.shape();
    let mut out = String::with_capacity(shape.cell_count() + shape.rows as usize);
    let origin = engine.plan().origin_index;
    for (i, look) in visuals.looks().enumerate() {
        if origin == Some(i) && !look.is_hidden() {
            out.push('@');
        } else {
            let level = (look.progress.clamp(0.0, 1.0) * (RAMP.len() - 1) as f32).round() as usize;
            out.push(RAMP[level.min(RAMP.len() - 1)] as char);
        }
        if (i + 1) % shape.columns as usize == 0 {
            out.push('\n');
        }
    }
    out
}

fn describe_cursor(frame: &CursorFrame, state: OrientationState) -> String {
    format!(
        "cursor {:?} rot={:7.1}deg reticule=({:.0},{:.0}) scale={:.2}",
        state, frame.rotation_deg, frame.reticule.x, frame.reticule.y, frame.scale
    )
}

fn run(args: Args) -> anyhow::Result<()> {
    let session = Session::new(args.config).context("invalid configuration")?;
    let config = session.config().clone();

    let engine = Rc::new(RefCell::new(RippleEngine::new(
        config.ripple.clone(),
        VIEWPORT,
        args.seed,
    )));
    let engine_for_listener = engine.clone();
    let _subscription = session.subscriber().on_publish(move |point| {
        engine_for_listener.borrow_mut().trigger(point);
    });

    let publisher = session.publisher();
    let mut visuals = CellVisuals::new(config.ripple.cell_spring);
    let mut cursor = MagneticController::new(config.cursor.clone());
    let targets = nav_targets();
    let reach = config.cursor.magnetic_reach_px;

    let steps = script();
    let end = steps.last().map(|s| s.at).unwrap_or_default() + ms(3000);
    let mut next = 0;
    let mut now = Duration::ZERO;
    let mut frame_no: u32 = 0;

    log::info!(
        "[sim] {}x{} viewport, {:?} grid, seed {}",
        VIEWPORT.x,
        VIEWPORT.y,
        engine.borrow().shape(),
        args.seed
    );

    while now <= end {
        let mut changed = false;
        while let Some(step) = steps.get(next).filter(|s| s.at <= now) {
            next += 1;
            changed = true;
            match step.action {
                Action::Click(p) => {
                    log::info!("[sim] t={:>5}ms click ({}, {})", now.as_millis(), p.x, p.y);
                    publisher.publish(p.x, p.y);
                }
                Action::Pointer(p) => {
                    cursor.pointer_moved(p);
                    let before = cursor.state();
                    cursor.on_proximity(targets.proximity(p, reach));
                    if cursor.state() != before {
                        log::info!(
                            "[sim] t={:>5}ms cursor {:?} -> {:?} (snap {:?})",
                            now.as_millis(),
                            before,
                            cursor.state(),
                            cursor.snap_target()
                        );
                    }
                }
                Action::Press(down) => cursor.set_pressed(down),
                Action::Resize(v) => {
                    let reshaped = engine.borrow_mut().resize(v);
                    log::info!(
                        "[sim] t={:>5}ms resize to {}x{} ({})",
                        now.as_millis(),
                        v.x,
                        v.y,
                        if reshaped { "new shape" } else { "same shape" }
                    );
                }
            }
        }

        if let Some(epoch) = engine.borrow_mut().tick(FRAME) {
            log::info!("[sim] t={:>5}ms ripple {} settled", now.as_millis(), epoch);
            changed = true;
        }
        let dt = FRAME.as_secs_f32();
        {
            let engine = engine.borrow();
            visuals.sync(&*engine);
            visuals.step(dt);
        }
        let cursor_frame = cursor.tick(FRAME);

        if changed || (frame_no % PRINT_EVERY_FRAMES == 0 && !visuals.is_at_rest()) {
            let engine = engine.borrow();
            println!(
                "t={:>5}ms {} {:?}  {}",
                now.as_millis(),
                engine.epoch(),
                engine.phase(),
                describe_cursor(&cursor_frame, cursor.state())
            );
            print!("{}", render_grid(&engine, &visuals));
        }

        now += FRAME;
        frame_no += 1;
    }

    log::info!("[sim] done after {} frames", frame_no);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = parse_args(std::env::args().skip(1)).and_then(run);
    if let Err(err) = result {
        log::error!("[sim] {err:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> anyhow::Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn overrides_and_seed_are_parsed() {
        let parsed = args(&["noise=0", "SEED=7", "cell_size=100"]).unwrap();
        assert_eq!(parsed.seed, 7);
        assert_eq!(parsed.config.ripple.noise, 0.0);
        assert_eq!(parsed.config.ripple.grid.cell_size, 100.0);
    }

    #[test]
    fn malformed_arguments_are_rejected() {
        assert!(args(&["noise"]).is_err());
        assert!(args(&["seed=abc"]).is_err());
        assert!(args(&["noise=-1"]).is_err());
        assert!(args(&["unknown=1"]).is_err());
    }

    #[test]
    fn ascii_grid_has_one_line_per_row() {
        let engine = RippleEngine::new(Config::default().ripple, VIEWPORT, 1);
        let mut visuals = CellVisuals::new(engine.params().cell_spring);
        visuals.sync(&engine);
        let text = render_grid(&engine, &visuals);
        let shape = engine.shape();
        assert_eq!(text.lines().count(), shape.rows as usize);
        assert!(text
            .lines()
            .all(|l| l.len() == shape.columns as usize && l.trim().is_empty()));
    }

    #[test]
    fn script_is_in_time_order() {
        let steps = script();
        assert!(steps.windows(2).all(|w| w[0].at <= w[1].at));
    }
}
