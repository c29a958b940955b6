/// Optional TOML settings for the courtrota CLI.
///
/// Looked up at $XDG_CONFIG_HOME/courtrota/config.toml, falling back to
/// ~/.config/courtrota/config.toml. Every key may be left out; flags win.
use courtrota_core::{Mode, TournamentConfig};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Deserialize, Default, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CourtrotaConfig {
    /// "americano" or "teams"
    pub mode: Option<String>,
    pub courts: Option<usize>,
    pub max_courts: Option<usize>,
    pub ranked: Option<bool>,
    pub seed: Option<u64>,
    /// Default state file for every command
    pub state: Option<String>,
}

/// Tournament settings given on the command line, before config fallbacks.
#[derive(Default)]
pub struct Overrides<'a> {
    pub mode: Option<&'a str>,
    pub courts: Option<usize>,
    pub max_courts: Option<usize>,
    pub ranked: bool,
    pub seed: Option<u64>,
}

const TEMPLATE: &str = r#"# courtrota settings. Command-line flags take precedence.

# "americano" (rotating doubles) or "teams" (fixed-team round robin)
# mode = "americano"

# Courts available per round
# courts = 2

# Larger court requests are clamped to this
# max_courts = 6

# Balance partners and opponents by rating (americano only)
# ranked = false

# Seed for court-order shuffles; a random one is drawn when unset
# seed = 42

# Where tournament state is saved between commands
# state = "courtrota.json"
"#;

impl CourtrotaConfig {
    pub fn default_path() -> PathBuf {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .unwrap_or_else(|| bail("Neither XDG_CONFIG_HOME nor HOME is set"));
        base.join("courtrota").join("config.toml")
    }

    /// A missing file is an empty config; anything unreadable is fatal.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no config at {}", path.display());
                return Self::default();
            }
            Err(e) => bail(format!("Cannot read {}: {e}", path.display())),
        };
        toml::from_str(&text).unwrap_or_else(|e| bail(format!("Invalid config {}: {e}", path.display())))
    }

    /// Write the commented template to `path`, refusing to overwrite.
    pub fn write_template(path: &Path) {
        if path.exists() {
            bail(format!("{} already exists", path.display()));
        }
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .unwrap_or_else(|e| bail(format!("Cannot create {}: {e}", dir.display())));
        }
        std::fs::write(path, TEMPLATE).unwrap_or_else(|e| bail(format!("Cannot write {}: {e}", path.display())));
    }

    /// Merge flags over this file over the library defaults.
    pub fn tournament_config(&self, flags: &Overrides) -> TournamentConfig {
        let defaults = TournamentConfig::default();
        let mode = match flags.mode.or(self.mode.as_deref()) {
            Some(name) => parse_mode(name).unwrap_or_else(|| {
                bail(format!("Unknown mode \"{name}\". Use \"americano\" or \"teams\"."))
            }),
            None => defaults.mode,
        };

        TournamentConfig {
            mode,
            courts: flags.courts.or(self.courts).unwrap_or(defaults.courts),
            max_courts: flags.max_courts.or(self.max_courts).unwrap_or(defaults.max_courts),
            ranked: flags.ranked || self.ranked.unwrap_or(defaults.ranked),
            seed: flags.seed.or(self.seed).unwrap_or_else(rand::random),
        }
    }
}

pub fn parse_mode(name: &str) -> Option<Mode> {
    match name.to_ascii_lowercase().as_str() {
        "americano" | "doubles" | "rotating-doubles" => Some(Mode::RotatingDoubles),
        "teams" | "fixed-team" => Some(Mode::FixedTeam),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_is_an_empty_config() {
        let cfg: CourtrotaConfig = toml::from_str(TEMPLATE).unwrap();
        assert_eq!(cfg, CourtrotaConfig::default());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(toml::from_str::<CourtrotaConfig>("cours = 3\n").is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let cfg: CourtrotaConfig = toml::from_str("courts = 3\nranked = true\nseed = 9\nmode = \"teams\"\n").unwrap();

        let merged = cfg.tournament_config(&Overrides::default());
        assert_eq!(merged.courts, 3);
        assert!(merged.ranked);
        assert_eq!(merged.seed, 9);
        assert_eq!(merged.mode, Mode::FixedTeam);

        let flags = Overrides {
            mode: Some("americano"),
            courts: Some(1),
            seed: Some(4),
            ..Overrides::default()
        };
        let merged = cfg.tournament_config(&flags);
        assert_eq!(merged.courts, 1);
        assert_eq!(merged.seed, 4);
        assert_eq!(merged.mode, Mode::RotatingDoubles);
        assert_eq!(merged.max_courts, TournamentConfig::default().max_courts);
    }

    #[test]
    fn test_parse_mode_aliases() {
        assert_eq!(parse_mode("Americano"), Some(Mode::RotatingDoubles));
        assert_eq!(parse_mode("fixed-team"), Some(Mode::FixedTeam));
        assert_eq!(parse_mode("singles"), None);
    }
}
