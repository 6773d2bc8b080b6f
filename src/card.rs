// The scratch card itself: joke text, loading / revealed flags, and the round lifecycle.
//
//   Loading --fetch done--> Covered --scratched > threshold--> Revealed
//      ^                                                          |
//      +------------------------- reset --------------------------+

use crate::fx::{Burst, Celebrate};
use crate::input::{to_surface_local, PointerEvent};
use crate::joke::{FetchOutcome, FetchTicket};
use crate::reveal::{scratched_percent, RevealDetector, DEFAULT_THRESHOLD};
use crate::surface::ScratchSurface;
use crate::toast::{Notifier, Toast};
use crate::types::Rect;

pub const FETCH_ERROR_TITLE: &str = "Error";
pub const FETCH_ERROR_DESCRIPTION: &str = "Failed to fetch joke. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Covered,
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardOptions {
    pub brush_radius: f32,
    pub reveal_threshold: f32,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self { brush_radius: 20.0, reveal_threshold: DEFAULT_THRESHOLD }
    }
}

pub struct ScratchCard<S: ScratchSurface> {
    surface: Option<S>,
    joke: String,
    loading: bool,
    detector: RevealDetector,
    scratched: f32,
    brush_radius: f32,
    latest: FetchTicket,
    paint_pending: bool,
}

impl<S: ScratchSurface> ScratchCard<S> {
    /// A card with no joke yet. `surface` may be absent; drawing calls then do nothing.
    pub fn new(surface: Option<S>, options: CardOptions) -> Self {
        Self {
            surface,
            joke: String::new(),
            loading: false,
            detector: RevealDetector::new(options.reveal_threshold),
            scratched: 0.0,
            brush_radius: options.brush_radius,
            latest: FetchTicket::default(),
            paint_pending: false,
        }
    }

    pub fn joke(&self) -> &str {
        &self.joke
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_revealed(&self) -> bool {
        self.detector.is_revealed()
    }

    /// Last computed scratched percentage [0,100].
    pub fn scratched_percent(&self) -> f32 {
        self.scratched
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.detector.is_revealed() {
            Phase::Revealed
        } else {
            Phase::Covered
        }
    }

    pub fn button_label(&self) -> &'static str {
        if self.loading { "Loading..." } else { "New Joke" }
    }

    /// First round: start fetching and paint once the joke is in.
    pub fn mount(&mut self) -> FetchTicket {
        let ticket = self.begin_fetch();
        self.paint_overlay();
        ticket
    }

    /// Mark a new fetch as in flight. The caller hands the ticket to the loader.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest = FetchTicket(self.latest.0 + 1);
        self.loading = true;
        log::info!("fetching joke ({:?})", self.latest);
        self.latest
    }

    /// Apply a finished fetch. Outcomes of superseded requests are dropped.
    pub fn complete_fetch(&mut self, outcome: FetchOutcome, notifier: &mut dyn Notifier) {
        if outcome.ticket != self.latest {
            log::debug!("dropping stale fetch {:?} (latest {:?})", outcome.ticket, self.latest);
            return;
        }
        match outcome.result {
            Ok(joke) => {
                log::info!("joke loaded ({} chars)", joke.chars().count());
                self.joke = joke;
            }
            Err(e) => {
                log::warn!("joke fetch failed: {e}");
                notifier.notify(Toast::destructive(FETCH_ERROR_TITLE, FETCH_ERROR_DESCRIPTION));
            }
        }
        self.loading = false;
        if self.paint_pending {
            self.paint_overlay();
        }
    }

    /// Cover the card again. While a fetch is in flight the paint waits for it.
    pub fn paint_overlay(&mut self) {
        if self.loading {
            self.paint_pending = true;
            return;
        }
        self.paint_pending = false;
        let Some(surface) = self.surface.as_mut() else { return };
        surface.paint();
        self.scratched = 0.0;
    }

    /// Scratch at a surface-local point. Returns true on the sample that reveals the card.
    pub fn scratch(&mut self, x: f32, y: f32, celebrate: &mut dyn Celebrate) -> bool {
        if self.phase() != Phase::Covered {
            return false;
        }
        let Some(surface) = self.surface.as_mut() else { return false };
        surface.erase_disc(x, y, self.brush_radius);
        self.scratched = scratched_percent(surface.buffer());

        if !self.detector.observe(self.scratched) {
            return false;
        }
        log::info!(
            "card revealed at {:.1}% scratched (threshold {}%)",
            self.scratched,
            self.detector.threshold()
        );
        celebrate.celebrate(&Burst::reveal());
        true
    }

    /// Scratch from a viewport pointer/touch sample over the surface's on-screen rect.
    pub fn handle_pointer(&mut self, event: &PointerEvent, bounds: Rect, celebrate: &mut dyn Celebrate) -> bool {
        let Some(point) = event.client_point() else { return false };
        let Some(surface) = self.surface.as_ref() else { return false };
        let (x, y) = to_surface_local(point, bounds, surface.buffer().dimensions());
        self.scratch(x, y, celebrate)
    }

    /// The "New Joke" button. Disabled while loading: returns None and changes nothing.
    pub fn press_button(&mut self) -> Option<FetchTicket> {
        if self.loading {
            log::debug!("button pressed while loading; ignored");
            return None;
        }
        Some(self.reset())
    }

    /// New round: clear the reveal, fetch another joke, cover the card again.
    pub fn reset(&mut self) -> FetchTicket {
        log::info!("new round");
        self.detector.rearm();
        self.scratched = 0.0;
        let ticket = self.begin_fetch();
        self.paint_overlay();
        ticket
    }
}
