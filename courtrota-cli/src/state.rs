/// Tournament state file: a `TournamentRecord` stored as pretty JSON.
use courtrota_core::{Tournament, TournamentRecord};
use std::path::{Path, PathBuf};

use crate::bail;

pub const DEFAULT_STATE_FILE: &str = "courtrota.json";

/// State path: CLI arg > config file > ./courtrota.json
pub fn resolve_path(arg: Option<PathBuf>, configured: Option<String>) -> PathBuf {
    arg.or_else(|| configured.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE))
}

pub fn load(path: &Path) -> Tournament {
    let content = std::fs::read_to_string(path).unwrap_or_else(|e| {
        bail(format!(
            "Failed to read state file {}: {e}. Start a tournament with `courtrota new`.",
            path.display()
        ))
    });
    let record: TournamentRecord = serde_json::from_str(&content)
        .unwrap_or_else(|e| bail(format!("Failed to parse state file {}: {e}", path.display())));
    Tournament::from_record(record).unwrap_or_else(|e| bail(e))
}

pub fn save(path: &Path, tournament: &Tournament) {
    let json = serde_json::to_string_pretty(&tournament.to_record())
        .unwrap_or_else(|e| bail(format!("Failed to serialize state: {e}")));
    std::fs::write(path, json)
        .unwrap_or_else(|e| bail(format!("Failed to write state file {}: {e}", path.display())));
    log::debug!("saved state to {}", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtrota_core::{Side, TournamentConfig};

    #[test]
    fn test_record_survives_json() {
        let roster = ["Ana", "Ben", "Cai", "Dee", "Eli"];
        let mut t = Tournament::new(TournamentConfig::default(), &roster).unwrap();
        t.generate_round().unwrap();
        t.enter_score(0, 0, Side::B, Some(9)).unwrap();

        let json = serde_json::to_string_pretty(&t.to_record()).unwrap();
        let record: TournamentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, t.to_record());
    }

    #[test]
    fn test_state_path_precedence() {
        assert_eq!(
            resolve_path(Some(PathBuf::from("a.json")), Some("b.json".into())),
            PathBuf::from("a.json")
        );
        assert_eq!(resolve_path(None, Some("b.json".into())), PathBuf::from("b.json"));
        assert_eq!(resolve_path(None, None), PathBuf::from(DEFAULT_STATE_FILE));
    }
}
