use super::{RenderInput, Template};
use leaderboard_common::snapshot::{Answer, LeaderboardRow};
use std::fmt::Write;

/// Renders the leaderboard as an HTML fragment. The lap columns sit in a scrollable wrapper
/// element carrying `viewport_id`.
#[derive(Debug, Clone)]
pub struct MarkupTemplate {
    pub viewport_id: String,
}

impl MarkupTemplate {
    pub fn new(viewport_id: &str) -> Self {
        Self {
            viewport_id: viewport_id.to_string(),
        }
    }
}

impl Template for MarkupTemplate {
    fn render(&self, input: &RenderInput) -> String {
        let mut out = String::new();
        // Writing to a String can't fail
        let _ = write_page(&mut out, input, &self.viewport_id);
        out
    }
}

fn write_page(out: &mut String, input: &RenderInput, viewport_id: &str) -> std::fmt::Result {
    write_header(out, input)?;
    write!(
        out,
        "<div id=\"{}\" class=\"leaderboard_wrapper\">\n<table>\n<tr><th class=\"name\">Group</th>",
        escape(viewport_id)
    )?;
    for lap in &input.laps {
        write!(out, "<th class=\"lap\">{lap}</th>")?;
    }
    writeln!(
        out,
        "<th class=\"score\">Score</th><th class=\"security\">Security</th></tr>"
    )?;

    for row in &input.leaderboard {
        write_row(out, row, input.laps.len())?;
    }
    writeln!(out, "</table>\n</div>")
}

fn write_header(out: &mut String, input: &RenderInput) -> std::fmt::Result {
    writeln!(out, "<header>")?;
    writeln!(
        out,
        "<h1>{}</h1>\n<p class=\"round\">Round {} / {}</p>\n<p class=\"lap\">Lap {} / {}</p>",
        escape(&input.round_name),
        input.current_round,
        input.number_of_rounds,
        input.current_lap,
        input.number_of_laps
    )?;
    if input.finished {
        writeln!(out, "<p class=\"status\">Finished</p>")?;
    } else if input.paused {
        writeln!(out, "<p class=\"status\">Paused</p>")?;
    } else {
        writeln!(
            out,
            "<p class=\"timer\">Next lap in {} s</p>",
            input.time_before_next_lap
        )?;
    }
    if input.current_with_noise {
        writeln!(out, "<p class=\"noise\">With noise</p>")?;
    }
    writeln!(out, "</header>")
}

fn write_row(out: &mut String, row: &LeaderboardRow, laps: usize) -> std::fmt::Result {
    write!(out, "<tr><td class=\"name\">{}</td>", escape(&row.name))?;
    for lap in 0..laps {
        match row.answers.get(lap) {
            Some(Answer {
                hide: false,
                guess,
                status,
            }) => write!(out, "<td class=\"{}\">{guess}</td>", status.as_str())?,
            _ => write!(out, "<td></td>")?,
        }
    }
    write!(out, "<td class=\"score\">{:.1}</td>", row.score)?;
    match &row.security_round {
        Some(security) => write!(
            out,
            "<td class=\"security\">{}% ({} traces, {})</td>",
            security.score,
            security.traces,
            escape(&security.time)
        )?,
        None => write!(out, "<td class=\"security\"></td>")?,
    }
    writeln!(out, "</tr>")
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
