//! Console output formatting with colored display

use std::fmt::Write as _;

use beatchart::{Chart, Difficulty, NoteKind, Rank, ScoreSummary};
use owo_colors::OwoColorize;

const BORDER_WIDTH: usize = 44;

/// Format a stored chart's overview
pub fn format_chart(session: &str, chart: &Chart) -> String {
    let mut output = String::new();
    let border = "━".repeat(BORDER_WIDTH);
    let border_dim = border.dimmed();

    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(
        output,
        "  {} [{}]",
        session.bold(),
        format_colored_difficulty(chart.difficulty)
    );
    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(output, "  TEMPO  : {:.1} BPM", chart.tempo);
    let _ = writeln!(output, "  LENGTH : {:.2}s", chart.duration);
    let _ = writeln!(output, "  NOTES  : {}", chart.note_count());
    let _ = writeln!(
        output,
        "  KINDS  : {}/{}/{}",
        chart.count_by_kind(NoteKind::Tap).cyan(),
        chart.count_by_kind(NoteKind::Hold).yellow(),
        chart.count_by_kind(NoteKind::Slide).purple(),
    );
    let _ = write!(output, "{}", border_dim);

    output
}

/// Format a finished session's score
pub fn format_summary(session: &str, summary: &ScoreSummary) -> String {
    let mut output = String::new();
    let border = "━".repeat(BORDER_WIDTH);
    let border_dim = border.dimmed();

    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(output, "  {}", session.bold());
    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(
        output,
        "  SCORE  : {} {}",
        summary.score,
        format_colored_rank(summary.rank)
    );
    let _ = writeln!(output, "  ACC    : {:.2}%", summary.accuracy_percent());
    let _ = writeln!(output, "  COMBO  : {}", summary.max_combo);
    let _ = writeln!(
        output,
        "  JUDGE  : {}/{}/{}/{}",
        summary.perfect.cyan(),
        summary.great.truecolor(255, 200, 0),
        summary.good.truecolor(255, 165, 0),
        summary.miss.truecolor(200, 50, 30),
    );
    let _ = write!(output, "{}", border_dim);

    output
}

fn format_colored_difficulty(difficulty: Difficulty) -> String {
    let name = difficulty.key().to_uppercase();
    match difficulty {
        Difficulty::Easy => name.green().to_string(),
        Difficulty::Normal => name.blue().to_string(),
        Difficulty::Hard => name.red().to_string(),
    }
}

fn format_colored_rank(rank: Rank) -> String {
    let name = rank.short_name();
    match rank {
        Rank::S => name.truecolor(255, 200, 0).bold().to_string(),
        Rank::A => name.truecolor(0, 255, 255).to_string(),
        Rank::B => name.green().to_string(),
        Rank::C => name.blue().to_string(),
        Rank::D => name.purple().to_string(),
        Rank::F => name.red().to_string(),
    }
}
