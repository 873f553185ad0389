use leaderboard_common::snapshot::{Guess, LeaderboardRow, Snapshot};
use serde::Serialize;

mod markup;
pub use markup::MarkupTemplate;

/// Display-ready projection of a [`Snapshot`]. Counters are one-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderInput {
    pub round_name: String,
    pub current_round: u32,
    pub current_lap: u32,
    pub number_of_rounds: u32,
    pub number_of_laps: u32,
    pub paused: bool,
    pub time_before_next_lap: String,
    /// Column headers, `1..=number_of_laps`
    pub laps: Vec<u32>,
    pub leaderboard: Vec<LeaderboardRow>,
    pub current_correct_guess: Option<Guess>,
    pub current_with_noise: bool,
    pub time_before_playing: String,
    pub finished: bool,
}

impl From<&Snapshot> for RenderInput {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            round_name: snapshot.round_name.clone(),
            current_round: snapshot.current_round + 1,
            // Before the first lap starts the header still reads lap 1
            current_lap: snapshot.current_lap.unwrap_or(0) + 1,
            number_of_rounds: snapshot.number_of_rounds,
            number_of_laps: snapshot.number_of_laps,
            paused: snapshot.paused,
            time_before_next_lap: one_decimal(snapshot.time_before_next_lap),
            laps: (1..=snapshot.number_of_laps).collect(),
            leaderboard: snapshot.leaderboard.clone(),
            current_correct_guess: snapshot.current_correct_guess,
            current_with_noise: snapshot.current_with_noise,
            time_before_playing: one_decimal(snapshot.time_before_playing),
            finished: snapshot.finished,
        }
    }
}

/// Formats `secs` with one decimal, rounding halves away from zero.
pub fn one_decimal(secs: f64) -> String {
    format!("{:.1}", (secs * 10.0).round() / 10.0)
}

/// Turns a [`RenderInput`] into markup for the display surface.
pub trait Template {
    fn render(&self, input: &RenderInput) -> String;
}
