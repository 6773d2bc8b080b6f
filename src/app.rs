// Window loop: layout, input dispatch, frame composition.
// What you SEE:
// • A heading, the joke panel covered by the gold card, and a "New Joke" button.
// • Hold Left Mouse and drag over the card to scratch it away.
// • Past half scratched: confetti, and the card stops reacting until "New Joke".
// • Fetch failures pop a red toast at the bottom. ESC quits.

use std::time::Instant;

use crate::card::{CardOptions, ScratchCard};
use crate::config::Settings;
use crate::draw::{draw_text_block, draw_text_centered, draw_text_shadowed, fill_rect, fit_text, text_width, Drawer};
use crate::error::Error;
use crate::fx::Confetti;
use crate::input::PointerEvent;
use crate::joke::JokeLoader;
use crate::surface::{OverlaySurface, ScratchSurface};
use crate::toast::ToastStack;
use crate::types::{blend_over, FrameBuffer, Rect};

pub const TITLE: &str = "Scratch & Laugh";

const BACKGROUND: u32 = 0x00_F3_E8_FF;
const PANEL: u32 = 0x00_FF_FF_FF;
const HEADING: u32 = 0x00_7C_3A_ED;
const JOKE_TEXT: u32 = 0x00_1F_29_37;
const BUTTON: u32 = 0x00_8B_5C_F6;
const BUTTON_DISABLED: u32 = 0x00_C4_B5_FD;
const BUTTON_TEXT: u32 = 0x00_FF_FF_FF;

const MARGIN: i32 = 25;
const HEADER_H: i32 = 50;
const BUTTON_H: i32 = 40;
const TOAST_H: i32 = 70;

/// Where everything sits, derived from the card size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub window: (usize, usize),
    pub card: Rect,
    pub button: Rect,
    pub toasts: Rect,
}

impl Layout {
    pub fn for_card(width: u32, height: u32) -> Self {
        let (w, h) = (width as i32, height as i32);
        let card = Rect::new(MARGIN, HEADER_H, w, h);
        let button = Rect::new(MARGIN, card.y + h + 20, w, BUTTON_H);
        let toasts = Rect::new(MARGIN, button.y + BUTTON_H + 10, w, TOAST_H);
        let window_w = (w + 2 * MARGIN) as usize;
        let window_h = (toasts.y + TOAST_H + 10) as usize;
        Self { window: (window_w, window_h), card, button, toasts }
    }
}

pub struct App {
    drawer: Drawer,
    screen: FrameBuffer,
    layout: Layout,
    card: ScratchCard<OverlaySurface>,
    loader: JokeLoader,
    toasts: ToastStack,
    confetti: Confetti,
    last_pointer: Option<(f32, f32)>,
    was_down: bool,
}

impl App {
    pub fn new(settings: &Settings, loader: JokeLoader) -> Result<Self, Error> {
        let layout = Layout::for_card(settings.width, settings.height);
        let (w, h) = layout.window;
        let drawer = Drawer::new(TITLE, w, h)?;
        let surface = OverlaySurface::new(settings.width, settings.height);
        let options: CardOptions = settings.card_options();

        Ok(Self {
            drawer,
            screen: FrameBuffer::new(w, h),
            layout,
            card: ScratchCard::new(Some(surface), options),
            loader,
            toasts: ToastStack::new(),
            confetti: Confetti::new(600, (w, h)),
            last_pointer: None,
            was_down: false,
        })
    }

    /// Run until the window closes or ESC is pressed.
    pub fn run(&mut self) -> Result<(), Error> {
        let ticket = self.card.mount();
        self.loader.request(ticket);

        let mut last_frame_time = Instant::now();
        while self.drawer.is_open() && !self.drawer.esc_pressed() {
            let now = Instant::now();
            let dt = (now - last_frame_time).as_secs_f32();
            last_frame_time = now;

            // 1) Finished fetches (non-blocking).
            while let Some(outcome) = self.loader.poll() {
                self.card.complete_fetch(outcome, &mut self.toasts);
            }

            // 2) Input
            self.handle_input();

            // 3) Animate, compose, present.
            self.confetti.update(dt);
            self.toasts.update(dt);
            compose_frame(&mut self.screen, &self.layout, &self.card);
            self.confetti.render(&mut self.screen);
            self.toasts.render(&mut self.screen, self.layout.toasts);
            self.drawer.present(&self.screen)?;
        }

        log::info!("window closed");
        Ok(())
    }

    fn handle_input(&mut self) {
        let down = self.drawer.left_mouse_down();
        let pointer = self.drawer.mouse_pos();
        let pressed = down && !self.was_down;
        self.was_down = down;

        let Some((mx, my)) = pointer else {
            self.last_pointer = None;
            return;
        };

        if pressed && self.layout.button.contains(mx, my) {
            if let Some(ticket) = self.card.press_button() {
                self.loader.request(ticket);
            }
        }

        // Scratch on movement only, like a pointer-move stream.
        let moved = self.last_pointer != Some((mx, my));
        self.last_pointer = Some((mx, my));
        if down && moved && self.layout.card.contains(mx, my) {
            let event = PointerEvent::Mouse { x: mx, y: my };
            self.card.handle_pointer(&event, self.layout.card, &mut self.confetti);
        }
    }
}

/// Draw everything except FX and toasts into `screen`.
pub fn compose_frame<S: ScratchSurface>(screen: &mut FrameBuffer, layout: &Layout, card: &ScratchCard<S>) {
    screen.fill(BACKGROUND);

    let cx = screen.width as i32 / 2;
    draw_text_shadowed(screen, cx - text_width("SCRATCH & LAUGH", 2) / 2, 16, "SCRATCH & LAUGH", HEADING, 2);

    // Joke panel underneath the overlay.
    let panel = layout.card;
    fill_rect(screen, panel, PANEL);
    let inner = Rect::new(panel.x + 12, panel.y + 12, panel.w - 24, panel.h - 24);
    let (scale, lines) = fit_text(card.joke(), inner, &[2, 1]);
    draw_text_block(screen, inner, &lines, JOKE_TEXT, scale);

    // Overlay, alpha-composited: scratched pixels let the joke through.
    if let Some(surface) = card.surface() {
        let buffer = surface.buffer();
        for (x, y, px) in buffer.enumerate_pixels() {
            let sx = panel.x + x as i32;
            let sy = panel.y + y as i32;
            if sx < 0 || sy < 0 || sx >= screen.width as i32 || sy >= screen.height as i32 {
                continue;
            }
            let idx = sy as usize * screen.width + sx as usize;
            screen.pixels[idx] = blend_over(screen.pixels[idx], *px);
        }
    }

    // Button
    let button = layout.button;
    let color = if card.is_loading() { BUTTON_DISABLED } else { BUTTON };
    fill_rect(screen, button, color);
    draw_text_centered(
        screen,
        button.x + button.w / 2,
        button.y + button.h / 2,
        card.button_label(),
        BUTTON_TEXT,
        2,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::{Burst, Celebrate};
    use crate::joke::FetchOutcome;
    use crate::surface::GOLD;
    use crate::toast::{Notifier, Toast};

    struct Quiet;

    impl Notifier for Quiet {
        fn notify(&mut self, _toast: Toast) {}
    }

    impl Celebrate for Quiet {
        fn celebrate(&mut self, _burst: &Burst) {}
    }

    fn ready_card() -> ScratchCard<OverlaySurface> {
        let mut card = ScratchCard::new(Some(OverlaySurface::new(350, 200)), CardOptions::default());
        let t = card.mount();
        card.complete_fetch(FetchOutcome { ticket: t, result: Ok("Hello world".into()) }, &mut Quiet);
        card
    }

    #[test]
    fn layout_stacks_card_button_and_toasts() {
        let layout = Layout::for_card(350, 200);
        assert_eq!(layout.window, (400, 400));
        assert_eq!(layout.card, Rect::new(25, 50, 350, 200));
        assert!(layout.button.y > layout.card.y + layout.card.h);
        assert!(layout.toasts.y > layout.button.y + layout.button.h);
        assert!(layout.toasts.y + layout.toasts.h <= layout.window.1 as i32);
    }

    #[test]
    fn largest_allowed_card_lays_out_without_overflow() {
        use crate::config::MAX_CARD_SIDE;

        let layout = Layout::for_card(MAX_CARD_SIDE, MAX_CARD_SIDE);
        assert_eq!(layout.card.w, MAX_CARD_SIDE as i32);
        assert_eq!(layout.window.0, MAX_CARD_SIDE as usize + 50);
    }

    #[test]
    fn covered_card_shows_the_overlay() {
        let layout = Layout::for_card(350, 200);
        let mut screen = FrameBuffer::new(layout.window.0, layout.window.1);
        let card = ready_card();
        compose_frame(&mut screen, &layout, &card);

        let idx = (layout.card.y + 5) as usize * screen.width + layout.card.x as usize;
        assert_eq!(screen.pixels[idx], GOLD);
    }

    #[test]
    fn scratched_pixels_show_the_panel() {
        let layout = Layout::for_card(350, 200);
        let mut screen = FrameBuffer::new(layout.window.0, layout.window.1);
        let mut card = ready_card();
        card.scratch(30.0, 30.0, &mut Quiet);
        compose_frame(&mut screen, &layout, &card);

        let idx = (layout.card.y + 30) as usize * screen.width + (layout.card.x + 30) as usize;
        assert_eq!(screen.pixels[idx], PANEL);
    }

    #[test]
    fn loading_button_is_dimmed() {
        let layout = Layout::for_card(350, 200);
        let mut screen = FrameBuffer::new(layout.window.0, layout.window.1);
        let mut card = ready_card();
        card.reset();
        compose_frame(&mut screen, &layout, &card);

        let idx = (layout.button.y + 2) as usize * screen.width + (layout.button.x + 2) as usize;
        assert_eq!(screen.pixels[idx], BUTTON_DISABLED);
    }
}
