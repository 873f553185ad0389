pub mod config;

pub mod snapshot;

pub mod defaults {
    /// Identifier of the horizontally scrollable element holding the lap columns
    pub const DEFAULT_VIEWPORT_ID: &str = "leaderboard_wrapper";
    /// Session key under which the display's view state is stored
    pub const DEFAULT_STATE_KEY: &str = "state";
}
