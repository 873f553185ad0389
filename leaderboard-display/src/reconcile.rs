use crate::render::RenderInput;
use crate::view_state::ViewState;
use leaderboard_common::{config::Scroll, snapshot::Snapshot};
use log::*;

/// Outcome of merging one incoming snapshot into the view state
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub input: RenderInput,
    pub state: ViewState,
    /// Laps advanced since the previous snapshot, zero while lap scrolling is inactive
    pub scroll_diff: i64,
    /// A new round started, scroll bookkeeping was zeroed
    pub reset_scroll: bool,
}

/// Laps advanced between `previous` and `incoming`. Only counts once the incoming lap is past
/// `lap_scroll_start`.
pub fn scroll_diff(previous: Option<&Snapshot>, incoming: &Snapshot, config: &Scroll) -> i64 {
    match (previous.and_then(|p| p.current_lap), incoming.current_lap) {
        (Some(prev_lap), Some(lap)) if lap > config.lap_scroll_start => {
            i64::from(lap) - i64::from(prev_lap)
        }
        _ => 0,
    }
}

pub fn reconcile(incoming: Snapshot, previous: Option<ViewState>, config: &Scroll) -> Reconciled {
    let mut state = previous.unwrap_or_default();

    let scroll_diff = scroll_diff(state.client.as_ref(), &incoming, config);
    let reset_scroll = incoming.current_lap == Some(0);
    if reset_scroll {
        info!(
            "Round {} started, resetting the lap columns",
            incoming.current_round + 1
        );
        state.reset_scroll();
    }
    debug!(
        "Reconciled lap {:?} (scroll diff {scroll_diff})",
        incoming.current_lap
    );

    let input = RenderInput::from(&incoming);
    state.client = Some(incoming);

    Reconciled {
        input,
        state,
        scroll_diff,
        reset_scroll,
    }
}
