use crate::reconcile::{Reconciled, reconcile};
use crate::render::Template;
use crate::scroll::animate;
use crate::surface::{ScrollAction, Surface};
use crate::view_state::{SessionStore, load_view_state, save_view_state};
use leaderboard_common::{config::Config, snapshot::Snapshot};
use log::*;

/// What one `update_leaderboard` cycle did
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub scroll_diff: i64,
    pub reset_scroll: bool,
    /// Scroll requests sent to the viewport, in order
    pub actions: Vec<ScrollAction>,
}

/// Owns everything one display needs to handle snapshots: each call to
/// [`Leaderboard::update_leaderboard`] reads the stored view state once and writes it back once.
pub struct Leaderboard<S, T, F> {
    store: S,
    template: T,
    surface: F,
    config: Config,
}

impl<S: SessionStore, T: Template, F: Surface> Leaderboard<S, T, F> {
    pub fn new(store: S, template: T, surface: F, config: Config) -> Self {
        Self {
            store,
            template,
            surface,
            config,
        }
    }

    pub fn surface(&self) -> &F {
        &self.surface
    }

    pub fn update_leaderboard(&mut self, snapshot: Snapshot) -> CycleReport {
        let key = self.config.display.state_key.as_str();
        let previous = load_view_state(&self.store, key);

        let Reconciled {
            input,
            state,
            scroll_diff,
            reset_scroll,
        } = reconcile(snapshot, Some(previous), &self.config.scroll);

        if let Some(viewport) = self.surface.viewport(&self.config.display.viewport_id) {
            if viewport.is_animating() {
                debug!("Snapshot arrived mid-scroll, restarting from the shown offset");
            }
        }
        self.surface.repaint(self.template.render(&input));

        let (actions, state) = match self.surface.viewport(&self.config.display.viewport_id) {
            Some(viewport) => animate(scroll_diff, state, viewport, &self.config.scroll),
            None => {
                warn!(
                    "No viewport with id {:?} after repaint, skipping scroll",
                    self.config.display.viewport_id
                );
                (Vec::new(), state)
            }
        };

        save_view_state(&mut self.store, key, &state);

        CycleReport {
            scroll_diff,
            reset_scroll,
            actions,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::render::MarkupTemplate;
    use crate::surface::{SimSurface, Viewport};
    use crate::view_state::{MemoryStore, ViewState};
    use coarsetime::Duration;
    use leaderboard_common::config::Display;

    type TestLeaderboard = Leaderboard<MemoryStore, MarkupTemplate, SimSurface>;

    fn leaderboard() -> TestLeaderboard {
        // 300 + 10 * 100 + 100 wide content in a 500 wide viewport: 900px of scroll
        let config = Config {
            display: Display {
                viewport_width: 500.0,
                name_column_width: 300.0,
                lap_column_width: 100.0,
                score_column_width: 100.0,
                ..Default::default()
            },
            ..Default::default()
        };
        Leaderboard::new(
            MemoryStore::default(),
            MarkupTemplate::new(&config.display.viewport_id),
            SimSurface::new(config.display.clone(), Duration::from_millis(0)),
            config,
        )
    }

    fn snapshot(lap: u32) -> Snapshot {
        Snapshot {
            round_name: "Classification accuracy".to_string(),
            current_round: 3,
            current_lap: Some(lap),
            number_of_rounds: 5,
            number_of_laps: 10,
            paused: false,
            time_before_next_lap: 9.87,
            ..Default::default()
        }
    }

    fn stored_state(leaderboard: &TestLeaderboard) -> ViewState {
        ViewState::from_json(&leaderboard.store.get("state").unwrap()).unwrap()
    }

    fn offset(leaderboard: &mut TestLeaderboard) -> f64 {
        leaderboard
            .surface
            .viewport("leaderboard_wrapper")
            .unwrap()
            .scroll_left()
    }

    #[test]
    fn test_first_snapshots() {
        let mut leaderboard = leaderboard();

        let report = leaderboard.update_leaderboard(snapshot(5));
        assert_eq!(report.scroll_diff, 0);
        assert_eq!(report.actions, vec![ScrollAction::instant(0.0)]);
        assert!(leaderboard.surface().markup().contains("Lap 6 / 10"));

        let report = leaderboard.update_leaderboard(snapshot(6));
        assert_eq!(report.scroll_diff, 1);
        assert_eq!(
            report.actions,
            vec![ScrollAction::instant(0.0), ScrollAction::smooth(100.0)]
        );
        let state = stored_state(&leaderboard);
        assert_eq!(state.last_scroll_value, 0.0);
        assert_eq!(state.current_scroll_value, 100.0);
        assert_eq!(state.client.unwrap().current_lap, Some(6));
        assert_eq!(offset(&mut leaderboard), 100.0);
    }

    #[test]
    fn test_position_survives_repaint() {
        let mut leaderboard = leaderboard();
        for lap in 5..=8 {
            leaderboard.update_leaderboard(snapshot(lap));
        }
        assert_eq!(offset(&mut leaderboard), 300.0);

        // Same lap again: put back where it was, nothing else
        let report = leaderboard.update_leaderboard(snapshot(8));
        assert_eq!(report.scroll_diff, 0);
        assert_eq!(report.actions, vec![ScrollAction::instant(300.0)]);
        assert_eq!(offset(&mut leaderboard), 300.0);
    }

    #[test]
    fn test_new_round_resets() {
        let mut leaderboard = leaderboard();
        for lap in 5..=7 {
            leaderboard.update_leaderboard(snapshot(lap));
        }
        assert_eq!(stored_state(&leaderboard).current_scroll_value, 200.0);

        let report = leaderboard.update_leaderboard(snapshot(0));
        assert!(report.reset_scroll);
        assert_eq!(report.actions, vec![ScrollAction::instant(0.0)]);
        let state = stored_state(&leaderboard);
        assert_eq!(state.current_scroll_value, 0.0);
        assert_eq!(state.last_scroll_value, 0.0);
        assert_eq!(state.double_last_scroll_value, 0.0);
        assert!(leaderboard.surface().markup().contains("Lap 1 / 10"));
    }

    #[test]
    fn test_snaps_back_at_the_end() {
        let mut leaderboard = leaderboard();
        leaderboard.update_leaderboard(snapshot(5));
        let state = ViewState {
            current_scroll_value: 1000.0,
            last_scroll_value: 900.0,
            ..stored_state(&leaderboard)
        };
        leaderboard
            .store
            .set("state", state.to_json().unwrap());

        // Restoring 1000 lands on the 900 limit, same as last time
        let report = leaderboard.update_leaderboard(snapshot(6));
        assert_eq!(
            report.actions,
            vec![ScrollAction::instant(1000.0), ScrollAction::smooth(-1400.0)]
        );
        assert_eq!(offset(&mut leaderboard), 0.0);
        // The target still moves on from the observed offset
        assert_eq!(stored_state(&leaderboard).current_scroll_value, 1000.0);
    }

    #[test]
    fn test_recovers_from_corrupt_state() {
        let mut leaderboard = leaderboard();
        leaderboard.store.set("state", "{not json".to_string());

        let report = leaderboard.update_leaderboard(snapshot(6));
        assert_eq!(report.scroll_diff, 0);
        assert_eq!(report.actions, vec![ScrollAction::instant(0.0)]);
        assert_eq!(
            stored_state(&leaderboard).client.unwrap().current_lap,
            Some(6)
        );
    }

    #[test]
    fn test_missing_viewport() {
        struct BlankTemplate;
        impl Template for BlankTemplate {
            fn render(&self, _: &crate::render::RenderInput) -> String {
                String::from("<p>Nothing to see</p>")
            }
        }

        let config = Config::default();
        let mut leaderboard = Leaderboard::new(
            MemoryStore::default(),
            BlankTemplate,
            SimSurface::new(config.display.clone(), Duration::from_millis(0)),
            config,
        );
        leaderboard.update_leaderboard(snapshot(5));
        let report = leaderboard.update_leaderboard(snapshot(6));
        assert_eq!(report.scroll_diff, 1);
        assert!(report.actions.is_empty());
        assert!(leaderboard.store.get("state").is_some());
    }
}
