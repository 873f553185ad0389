use crate::surface::{ScrollAction, Viewport};
use crate::view_state::ViewState;
use leaderboard_common::config::Scroll;
use log::*;

/// Computes the progress scroll for a lap advance of `scroll_diff`, given the offset observed once
/// the viewport was restored. Returns `None` when the lap did not advance.
///
/// Landing on the same non-zero offset two advances in a row means the lap columns can't scroll
/// any further, so the viewport is sent back to the start instead.
pub fn progress(
    scroll_diff: i64,
    state: &mut ViewState,
    observed_offset: f64,
    scroll_width: f64,
    config: &Scroll,
) -> Option<ScrollAction> {
    if scroll_diff <= 0 {
        return None;
    }
    let total_scroll_amount = scroll_diff as f64 * config.scroll_amount_per_lap;

    state.double_last_scroll_value = state.last_scroll_value;
    state.last_scroll_value = observed_offset;

    let action = if state.double_last_scroll_value > 0.0
        && state.double_last_scroll_value == state.last_scroll_value
    {
        info!("Lap columns stuck at {observed_offset}, scrolling back to the start");
        ScrollAction::smooth(-scroll_width)
    } else {
        ScrollAction::smooth(total_scroll_amount)
    };
    state.current_scroll_value = state.last_scroll_value + total_scroll_amount;
    Some(action)
}

/// Runs one scroll cycle against a freshly repainted `viewport`: first puts it back where it was
/// before the repaint, then scrolls forward for any lap advance. Returns the actions applied, in
/// order.
pub fn animate<V: Viewport + ?Sized>(
    scroll_diff: i64,
    mut state: ViewState,
    viewport: &mut V,
    config: &Scroll,
) -> (Vec<ScrollAction>, ViewState) {
    let restore = ScrollAction::instant(state.current_scroll_value);
    viewport.scroll_by(restore);
    let mut actions = vec![restore];

    let observed_offset = viewport.scroll_left();
    if let Some(action) = progress(
        scroll_diff,
        &mut state,
        observed_offset,
        viewport.scroll_width(),
        config,
    ) {
        trace!("Scrolling by {} after a {scroll_diff} lap advance", action.left);
        viewport.scroll_by(action);
        actions.push(action);
    }

    (actions, state)
}
