use coarsetime::{Duration, Instant};
use leaderboard_common::config::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// Request to move a viewport horizontally by `left` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAction {
    pub left: f64,
    pub behavior: ScrollBehavior,
}

impl ScrollAction {
    pub fn instant(left: f64) -> Self {
        Self {
            left,
            behavior: ScrollBehavior::Instant,
        }
    }

    pub fn smooth(left: f64) -> Self {
        Self {
            left,
            behavior: ScrollBehavior::Smooth,
        }
    }
}

/// A horizontally scrollable element.
pub trait Viewport {
    /// Current horizontal offset, including any scroll still in flight
    fn scroll_left(&self) -> f64;
    /// Full width of the scrollable content
    fn scroll_width(&self) -> f64;
    /// Smooth scrolls are fire-and-forget, there is no completion signal
    fn scroll_by(&mut self, action: ScrollAction);

    fn is_animating(&self) -> bool {
        false
    }
}

/// The container the leaderboard markup is painted into.
pub trait Surface {
    /// Replaces the whole content. Nested viewports come back scrolled to the start.
    fn repaint(&mut self, markup: String);
    fn viewport(&mut self, id: &str) -> Option<&mut dyn Viewport>;
}

pub(crate) trait Interpolate {
    /// `value` must be a `float` normally varying from `0f64` to `1f64`
    fn interpolate_linear(&self, value: f64) -> f64;
}

impl Interpolate for (f64, f64) {
    fn interpolate_linear(&self, value: f64) -> f64 {
        (self.1 - self.0).mul_add(value, self.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Animation {
    start: Instant,
    from: f64,
}

#[derive(Debug, Clone)]
pub struct SimViewport {
    client_width: f64,
    scroll_width: f64,
    /// Where the viewport rests once any animation has finished
    target: f64,
    animation: Option<Animation>,
    smooth_duration: Duration,
}

impl SimViewport {
    pub fn new(client_width: f64, scroll_width: f64, smooth_duration: Duration) -> Self {
        Self {
            client_width,
            scroll_width,
            target: 0.0,
            animation: None,
            smooth_duration,
        }
    }

    pub fn max_scroll_left(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }

    fn animation_progress(&self) -> Option<(Animation, f64)> {
        let animation = self.animation?;
        if self.smooth_duration.as_ticks() == 0 {
            return None;
        }
        let time = Instant::now().duration_since(animation.start).as_f64()
            / self.smooth_duration.as_f64();
        (time < 1.0).then_some((animation, time))
    }
}

impl Viewport for SimViewport {
    fn scroll_left(&self) -> f64 {
        match self.animation_progress() {
            Some((animation, time)) => (animation.from, self.target).interpolate_linear(time),
            None => self.target,
        }
    }

    fn scroll_width(&self) -> f64 {
        self.scroll_width
    }

    fn is_animating(&self) -> bool {
        self.animation_progress().is_some()
    }

    fn scroll_by(&mut self, action: ScrollAction) {
        // A new request re-bases from wherever the viewport currently shows
        let from = self.scroll_left();
        self.target = (from + action.left).clamp(0.0, self.max_scroll_left());
        self.animation = match action.behavior {
            ScrollBehavior::Instant => None,
            ScrollBehavior::Smooth => Some(Animation {
                start: Instant::now(),
                from,
            }),
        };
    }
}

/// Stand-in for the display's page: keeps the last markup and lays out the lap columns of the
/// leaderboard viewport from it.
#[derive(Debug, Clone)]
pub struct SimSurface {
    layout: Display,
    smooth_duration: Duration,
    markup: String,
    viewport: Option<SimViewport>,
}

impl SimSurface {
    pub fn new(layout: Display, smooth_duration: Duration) -> Self {
        Self {
            layout,
            smooth_duration,
            markup: String::new(),
            viewport: None,
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }
}

impl Surface for SimSurface {
    fn repaint(&mut self, markup: String) {
        self.viewport = if markup.contains(&format!("id=\"{}\"", self.layout.viewport_id)) {
            let laps = markup.matches("<th class=\"lap\">").count() as f64;
            let content_width = self.layout.name_column_width
                + laps * self.layout.lap_column_width
                + self.layout.score_column_width;
            Some(SimViewport::new(
                self.layout.viewport_width,
                content_width,
                self.smooth_duration,
            ))
        } else {
            None
        };
        self.markup = markup;
    }

    fn viewport(&mut self, id: &str) -> Option<&mut dyn Viewport> {
        if id != self.layout.viewport_id {
            return None;
        }
        self.viewport.as_mut().map(|v| v as &mut dyn Viewport)
    }
}
