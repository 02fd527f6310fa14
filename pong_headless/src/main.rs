//! Headless Pong host.
//!
//! Loads a field layout, runs the match at a fixed frame rate and logs the
//! score. Keys given with `--hold` stay pressed for the whole run.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use pong_core::{Config, FieldLayout, Game, InputManager, Key, Keyboard, LogScoreDisplay};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pong_headless", about = "Run a Pong match without a window")]
struct Args {
    /// Field layout (RON). Uses the built-in field when omitted.
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Tuning overrides (RON). Missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u32,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Keys held down all match, e.g. `--hold w,up`
    #[arg(long, value_delimiter = ',')]
    hold: Vec<String>,
}

/// Keyboard with a fixed set of keys held down.
struct HeldKeys(HashSet<Key>);

impl Keyboard for HeldKeys {
    fn is_pressed(&self, key: Key) -> bool {
        self.0.contains(&key)
    }
}

fn load_layout(path: Option<&PathBuf>) -> Result<FieldLayout> {
    match path {
        Some(path) => FieldLayout::load(path)
            .with_context(|| format!("cannot start without a field ({})", path.display())),
        None => {
            info!("no layout given, using the built-in field");
            Ok(FieldLayout::default())
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    Config::from_ron_str(&source).with_context(|| format!("failed to parse config {}", path.display()))
}

fn held_keys(names: &[String]) -> HashSet<Key> {
    names
        .iter()
        .filter_map(|name| {
            let key = Key::from_name(name.trim());
            if key.is_none() {
                warn!(name = name.as_str(), "unknown key ignored");
            }
            key
        })
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if args.fps <= 0.0 {
        bail!("--fps must be positive, got {}", args.fps);
    }

    let layout = load_layout(args.layout.as_ref())?;
    let config = load_config(args.config.as_ref())?;
    info!(?config, "config loaded");

    let mut game = Game::arcade(layout, config, args.seed);
    let mut input = InputManager::default();
    let mut display = LogScoreDisplay::new();

    let keys = held_keys(&args.hold);
    if !keys.is_empty() {
        input.connect_keyboard(Box::new(HeldKeys(keys)));
    }

    let dt = 1.0 / args.fps;
    for _ in 0..args.frames {
        game.tick(dt, &mut input, &mut display);
        if let Some(winner) = game.winner() {
            info!(%winner, frame = game.time.frame, "match over");
            break;
        }
    }

    info!(
        left = game.state.score_left,
        right = game.state.score_right,
        frames = game.time.frame,
        seconds = game.time.now,
        "final score"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_skip_unknown_names() {
        let keys = held_keys(&["w".into(), " up".into(), "q".into()]);
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&Key::W));
        assert!(keys.contains(&Key::ArrowUp));
    }

    #[test]
    fn test_missing_layout_file_is_fatal() {
        let path = PathBuf::from("/definitely/not/a/field.ron");
        assert!(load_layout(Some(&path)).is_err());
    }

    #[test]
    fn test_no_layout_uses_default() {
        assert_eq!(load_layout(None).unwrap(), FieldLayout::default());
    }

    #[test]
    fn test_args_parse_hold_list() {
        let args = Args::parse_from(["pong_headless", "--hold", "w,down", "--frames", "10"]);
        assert_eq!(args.hold, vec!["w".to_string(), "down".to_string()]);
        assert_eq!(args.frames, 10);
        assert_eq!(args.seed, 12345);
    }

    #[test]
    fn test_bundled_assets_parse() {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets");
        load_layout(Some(&dir.join("field.ron"))).unwrap();
        load_config(Some(&dir.join("config.ron"))).unwrap();
    }
}
