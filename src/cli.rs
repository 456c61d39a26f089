use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::core::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Play,
    Script,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub mode: Mode,
    pub config: Option<PathBuf>,
}

/// Parse `[play|script] [--config <path>]`. With no mode the game is played.
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut mode = Mode::Play;
    let mut config = None;
    let mut i = 0usize;

    if let Some(first) = args.first() {
        match first.as_str() {
            "play" => i = 1,
            "script" => {
                mode = Mode::Script;
                i = 1;
            }
            _ => {}
        }
    }

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                config = Some(PathBuf::from(v));
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(CliArgs { mode, config })
}

/// Load the game configuration, or the defaults when no path is given.
pub fn load_config(path: Option<&PathBuf>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = GameConfig::from_json(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_play_without_config() {
        let parsed = parse_args(&[]).unwrap();
        assert_eq!(parsed, CliArgs { mode: Mode::Play, config: None });
    }

    #[test]
    fn script_mode_with_config() {
        let parsed = parse_args(&args(&["script", "--config", "game.json"])).unwrap();
        assert_eq!(parsed.mode, Mode::Script);
        assert_eq!(parsed.config, Some(PathBuf::from("game.json")));
    }

    #[test]
    fn config_without_mode_plays() {
        let parsed = parse_args(&args(&["--config", "game.json"])).unwrap();
        assert_eq!(parsed.mode, Mode::Play);
    }

    #[test]
    fn rejects_missing_value_and_unknown_flags() {
        assert!(parse_args(&args(&["script", "--config"])).is_err());
        assert!(parse_args(&args(&["play", "--speed", "3"])).is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let path = PathBuf::from("/nonexistent/blockfall.json");
        assert!(load_config(Some(&path)).is_err());
        assert_eq!(load_config(None).unwrap(), GameConfig::default());
    }
}
