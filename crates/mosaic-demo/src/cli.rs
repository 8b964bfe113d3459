#![forbid(unsafe_code)]

//! Command-line argument parsing.
//!
//! Arguments are parsed by hand. `MOSAIC_*` environment variables set
//! defaults that explicit flags override.

use std::env;
use std::path::PathBuf;
use std::process;

use mosaic_runtime::EngineConfig;

use crate::config::PuzzleConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
mosaic-demo: scramble a picture into tiles and put it back together

USAGE:
    mosaic-demo [OPTIONS]

OPTIONS:
    --fps=N                Target frame rate (default: 60, 0 = unpaced)
    --tile-size=N          Tile edge in image pixels (default: 16)
    --difficulty=N         Scramble difficulty, 4 moves per level (default: 2)
    --seed=N               Seed for the first puzzle (default: random)
    --image=PATH           PNG, JPEG or GIF to scramble (default: built-in)
    --headless-frames=N    Run N frames without a terminal, then exit
    --log=FILTER           Log filter, e.g. 'debug' or 'mosaic_runtime=trace'
    --log-file=PATH        Write logs to PATH
    --help, -h             Show this help message
    --version, -V          Show version

KEYBINDINGS:
    Arrows          Move the selection
    q               Flip the selected tile
    w               Rotate the selected tile
    e               Mark a swap anchor, then swap it with the selection
    s               Solve (replays the scramble backwards)
    n               New puzzle
    Enter           Play (menu)
    Escape          Back to menu / quit from menu
    Ctrl+C          Quit

ENVIRONMENT VARIABLES:
    MOSAIC_FPS              Override --fps
    MOSAIC_TILE_SIZE        Override --tile-size
    MOSAIC_DIFFICULTY       Override --difficulty
    MOSAIC_SEED             Override --seed
    MOSAIC_IMAGE            Override --image
    MOSAIC_HEADLESS_FRAMES  Override --headless-frames
    MOSAIC_LOG              Override --log";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub fps: u32,
    pub tile_size: u32,
    pub difficulty: u32,
    pub seed: Option<u64>,
    pub image: Option<PathBuf>,
    /// Run this many frames headless instead of opening the terminal.
    pub headless_frames: Option<u64>,
    pub log_filter: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            fps: 60,
            tile_size: 16,
            difficulty: 2,
            seed: None,
            image: None,
            headless_frames: None,
            log_filter: "info".into(),
            log_file: None,
        }
    }
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Run(Opts),
    Help,
    Version,
}

fn number<T: std::str::FromStr>(flag: &str, val: &str) -> Result<T, String> {
    val.parse()
        .map_err(|_| format!("Invalid --{flag} value: {val}"))
}

impl Opts {
    /// Parse the process arguments and environment, printing help or an
    /// error and exiting where appropriate.
    pub fn parse() -> Self {
        match Self::parse_from(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(Action::Run(opts)) => opts,
            Ok(Action::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Action::Version) => {
                println!("mosaic-demo {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` with `env` looking up environment variables.
    ///
    /// Malformed environment values are ignored; malformed flags are errors.
    pub fn parse_from<I, F>(args: I, env: F) -> Result<Action, String>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Environment first
        if let Some(n) = env("MOSAIC_FPS").and_then(|v| v.parse().ok()) {
            opts.fps = n;
        }
        if let Some(n) = env("MOSAIC_TILE_SIZE").and_then(|v| v.parse().ok()) {
            opts.tile_size = n;
        }
        if let Some(n) = env("MOSAIC_DIFFICULTY").and_then(|v| v.parse().ok()) {
            opts.difficulty = n;
        }
        if let Some(n) = env("MOSAIC_SEED").and_then(|v| v.parse().ok()) {
            opts.seed = Some(n);
        }
        if let Some(path) = env("MOSAIC_IMAGE") {
            opts.image = Some(PathBuf::from(path));
        }
        if let Some(n) = env("MOSAIC_HEADLESS_FRAMES").and_then(|v| v.parse().ok()) {
            opts.headless_frames = Some(n);
        }
        if let Some(filter) = env("MOSAIC_LOG") {
            opts.log_filter = filter;
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Action::Help),
                "--version" | "-V" => return Ok(Action::Version),
                other => {
                    let Some((flag, val)) = other
                        .strip_prefix("--")
                        .and_then(|rest| rest.split_once('='))
                    else {
                        return Err(format!("Unknown argument: {other}"));
                    };
                    match flag {
                        "fps" => opts.fps = number(flag, val)?,
                        "tile-size" => opts.tile_size = number(flag, val)?,
                        "difficulty" => opts.difficulty = number(flag, val)?,
                        "seed" => opts.seed = Some(number(flag, val)?),
                        "image" => opts.image = Some(PathBuf::from(val)),
                        "headless-frames" => opts.headless_frames = Some(number(flag, val)?),
                        "log" => opts.log_filter = val.to_string(),
                        "log-file" => opts.log_file = Some(PathBuf::from(val)),
                        _ => return Err(format!("Unknown argument: {other}")),
                    }
                }
            }
        }

        if opts.tile_size == 0 {
            return Err("--tile-size must be at least 1".into());
        }
        Ok(Action::Run(opts))
    }

    /// Engine settings. The frame size is a placeholder; hosts report their own.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::default()
            .with_fps(self.fps)
            .with_size(80, 48)
    }

    pub fn puzzle_config(&self) -> PuzzleConfig {
        PuzzleConfig {
            tile_size: self.tile_size,
            difficulty: self.difficulty,
            seed: self.seed,
            image: self.image.clone(),
            ..PuzzleConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert_eq!(opts.fps, 60);
        assert_eq!(opts.tile_size, 16);
        assert_eq!(opts.difficulty, 2);
        assert_eq!(opts.seed, None);
        assert_eq!(opts.log_filter, "info");
    }

    #[test]
    fn flags_are_parsed() {
        let action = Opts::parse_from(
            args(&["--seed=42", "--difficulty=3", "--image=cat.png", "--headless-frames=5"]),
            no_env,
        )
        .unwrap();
        let Action::Run(opts) = action else {
            panic!("expected run, got {action:?}");
        };
        assert_eq!(opts.seed, Some(42));
        assert_eq!(opts.difficulty, 3);
        assert_eq!(opts.image, Some(PathBuf::from("cat.png")));
        assert_eq!(opts.headless_frames, Some(5));
    }

    #[test]
    fn flags_override_environment() {
        let env = |key: &str| match key {
            "MOSAIC_SEED" => Some("7".to_string()),
            "MOSAIC_FPS" => Some("30".to_string()),
            "MOSAIC_DIFFICULTY" => Some("lots".to_string()),
            _ => None,
        };
        let Ok(Action::Run(opts)) = Opts::parse_from(args(&["--seed=9"]), env) else {
            panic!("expected run");
        };
        assert_eq!(opts.seed, Some(9));
        assert_eq!(opts.fps, 30);
        assert_eq!(opts.difficulty, 2);
    }

    #[test]
    fn help_and_version() {
        assert_eq!(Opts::parse_from(args(&["-h"]), no_env), Ok(Action::Help));
        assert_eq!(Opts::parse_from(args(&["--version"]), no_env), Ok(Action::Version));
    }

    #[test]
    fn bad_input_is_rejected() {
        assert!(Opts::parse_from(args(&["--fps=fast"]), no_env).is_err());
        assert!(Opts::parse_from(args(&["--colour=red"]), no_env).is_err());
        assert!(Opts::parse_from(args(&["stray"]), no_env).is_err());
        assert!(Opts::parse_from(args(&["--tile-size=0"]), no_env).is_err());
    }

    #[test]
    fn help_text_lists_keys() {
        assert!(HELP_TEXT.contains("Flip the selected tile"));
        assert!(HELP_TEXT.contains("MOSAIC_SEED"));
        assert!(!VERSION.is_empty());
    }
}
