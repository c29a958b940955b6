/// Roster input: a file, repeated `--entry` flags, or piped stdin.
use std::io::{self, IsTerminal};
use std::path::Path;

use crate::bail;

/// Parse roster text. A leading `[` means a JSON array of names; anything
/// else is one name per line, with `#` starting a comment line.
pub fn parse_roster(text: &str) -> Vec<String> {
    let body = text.trim_start();
    let names: Vec<String> = if body.starts_with('[') {
        serde_json::from_str(body).unwrap_or_else(|e| bail(format!("Roster is not a JSON array of names: {e}")))
    } else {
        body.lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .map(str::to_string)
            .collect()
    };

    // Blank names must not suppress the stdin fallback.
    names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Gather entries from `file` and `inline`; with neither, read piped stdin.
pub fn read_roster(file: Option<&Path>, inline: &[String]) -> Vec<String> {
    let mut entries = match file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .unwrap_or_else(|e| bail(format!("Cannot read roster {}: {e}", path.display())));
            parse_roster(&text)
        }
        None => Vec::new(),
    };
    entries.extend(
        inline
            .iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty()),
    );

    if entries.is_empty() {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            bail("No roster given. Pass --entries <file>, --entry <name> or pipe names on stdin.");
        }
        let text = io::read_to_string(stdin).unwrap_or_else(|e| bail(format!("Cannot read stdin: {e}")));
        entries = parse_roster(&text);
    }

    log::debug!("read {} roster entries", entries.len());
    entries
}
