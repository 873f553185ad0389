use derivative::Derivative;
use enum_iterator::{Sequence, all};
use serde::{Deserialize, Serialize};

/// One tick of the race clock, as pushed by the leaderboard server.
///
/// `current_round` and `current_lap` are zero-based. `current_lap` is absent until the first lap
/// of a round has started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub round_name: String,
    pub current_round: u32,
    pub current_lap: Option<u32>,
    pub number_of_rounds: u32,
    pub number_of_laps: u32,
    pub paused: bool,
    pub time_before_next_lap: f64,
    pub leaderboard: Vec<LeaderboardRow>,
    /// Only sent to admin clients
    #[serde(default)]
    pub current_correct_guess: Option<Guess>,
    #[serde(default)]
    pub current_with_noise: bool,
    #[serde(default)]
    pub time_before_playing: f64,
    #[serde(default)]
    pub finished: bool,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            round_name: String::new(),
            current_round: 0,
            current_lap: None,
            number_of_rounds: 0,
            number_of_laps: 0,
            paused: true,
            time_before_next_lap: 0.0,
            leaderboard: Vec::new(),
            current_correct_guess: None,
            current_with_noise: false,
            time_before_playing: 0.0,
            finished: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub name: String,
    pub answers: Vec<Answer>,
    pub score: f64,
    #[serde(default)]
    pub security_round: Option<SecurityGuess>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub guess: Guess,
    #[serde(default)]
    pub status: AnswerStatus,
    /// Set for laps that have not been played yet
    #[serde(default)]
    pub hide: bool,
}

#[derive(Derivative, Serialize, Deserialize, Sequence)]
#[derivative(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Guess {
    Birds,
    Chainsaw,
    Fire,
    Handsaw,
    Helicopter,
    #[derivative(Default)]
    Nothing,
    Received,
    Penalized,
}

impl Guess {
    /// The guesses a group may actually submit. The other variants are only produced by the
    /// server when scoring.
    pub fn possible_values() -> Vec<Guess> {
        all::<Guess>()
            .filter(|guess| !matches!(guess, Self::Nothing | Self::Received | Self::Penalized))
            .collect()
    }
}

impl core::fmt::Display for Guess {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::Birds => write!(f, "birds"),
            Self::Chainsaw => write!(f, "chainsaw"),
            Self::Fire => write!(f, "fire"),
            Self::Handsaw => write!(f, "handsaw"),
            Self::Helicopter => write!(f, "helicopter"),
            Self::Nothing => write!(f, "nothing"),
            Self::Received => write!(f, "received"),
            Self::Penalized => write!(f, "penalized"),
        }
    }
}

#[derive(Derivative, Serialize, Deserialize)]
#[derivative(Debug, Default, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum AnswerStatus {
    Correct,
    #[derivative(Default)]
    Incorrect,
    CorrectPenalized,
    IncorrectPenalized,
}

impl AnswerStatus {
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct | Self::CorrectPenalized)
    }

    pub fn is_penalized(self) -> bool {
        matches!(self, Self::CorrectPenalized | Self::IncorrectPenalized)
    }

    /// Name used as a markup class
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
            Self::CorrectPenalized => "correct_penalized",
            Self::IncorrectPenalized => "incorrect_penalized",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityGuess {
    /// Formatted as `HH:MM`
    pub time: String,
    /// Percentage, 0 to 100
    pub score: u8,
    pub traces: u64,
}

/// Events the server pushes on the real-time channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    UpdateLeaderboard(Snapshot),
}

impl ServerEvent {
    pub fn from_json(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}
