/// Output formatting: terminal tables and JSON.
use courtrota_core::{Match, Mode, RankingRow, Round};
use serde::Serialize;

use crate::bail;

#[derive(Serialize)]
struct JsonOutput<'a> {
    mode: Mode,
    rounds: &'a [Round],
    standings: &'a [RankingRow],
}

fn score_cell(score: Option<u32>) -> String {
    score.map_or_else(|| "-".to_string(), |s| s.to_string())
}

fn format_match(court: usize, m: &Match) -> String {
    let a = m.team_a.to_string();
    let b = m.team_b.to_string();
    if m.is_completed() {
        format!(
            "  Court {}: {a}  vs  {b}   {} - {}",
            court + 1,
            score_cell(m.score_a),
            score_cell(m.score_b)
        )
    } else {
        format!("  Court {}: {a}  vs  {b}", court + 1)
    }
}

/// Print one round: a line per court, then who sits out.
pub fn print_round(round: &Round) {
    println!("Round {}", round.index + 1);
    if round.is_empty() {
        println!("  (no matches could be scheduled)");
    }
    for (court, m) in round.matches.iter().enumerate() {
        println!("{}", format_match(court, m));
    }
    if !round.sitting_out.is_empty() {
        println!("  Sitting out: {}", round.sitting_out.join(", "));
    }
}

pub fn print_rounds(rounds: &[Round]) {
    for (i, round) in rounds.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_round(round);
    }
}

/// Print the ranking table. Doubles show ratings; fixed teams show a scoreboard.
pub fn print_standings(rows: &[RankingRow], mode: Mode) {
    let label = match mode {
        Mode::RotatingDoubles => "Player",
        Mode::FixedTeam => "Team",
    };
    let name_width = rows
        .iter()
        .map(|r| r.player.len())
        .max()
        .unwrap_or(label.len())
        .max(label.len());

    match mode {
        Mode::RotatingDoubles => {
            println!(" # | {label:<name_width$} | Rating | Games |  W |  L |  Diff");
            println!("---|-{}-|--------|-------|----|----|------", "-".repeat(name_width));
            for r in rows {
                println!(
                    "{:>2} | {:<name_width$} | {:>6.0} | {:>5} | {:>2} | {:>2} | {:>+5}",
                    r.rank, r.player, r.rating, r.games, r.wins, r.losses, r.point_diff,
                );
            }
        }
        Mode::FixedTeam => {
            println!(" # | {label:<name_width$} |  W |  L |  PF |  PA |  Diff");
            println!("---|-{}-|----|----|-----|-----|------", "-".repeat(name_width));
            for r in rows {
                println!(
                    "{:>2} | {:<name_width$} | {:>2} | {:>2} | {:>3} | {:>3} | {:>+5}",
                    r.rank, r.player, r.wins, r.losses, r.points_for, r.points_against, r.point_diff,
                );
            }
        }
    }
}

/// Print rounds and standings as JSON.
pub fn print_json(mode: Mode, rounds: &[Round], standings: &[RankingRow]) {
    let output = JsonOutput {
        mode,
        rounds,
        standings,
    };
    let text = serde_json::to_string_pretty(&output)
        .unwrap_or_else(|e| bail(format!("Failed to serialize output: {e}")));
    println!("{text}");
}
