/// Top-level application: owns every subsystem and runs the frame loop.

use std::io::Write;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::terminal;

use crate::compute;
use crate::config::{self, Config};
use crate::display::{self, Canvas};
use crate::entities::{GameState, Sprite, SpriteSet};
use crate::image_cache::{ImageCache, ImageLoader, LoadFlags, PixelFormat, PngLoader};
use crate::input::{Buttons, KeyTracker, Pad};
use crate::random::Random;
use crate::timing::FrameSync;

pub struct App<L: ImageLoader = PngLoader> {
    images: ImageCache<L>,
    state: GameState,
    rng: Random,
    pad: Pad,
    clock: FrameSync,
    canvas: Canvas,
}

impl<L: ImageLoader> App<L> {
    pub fn new(config: Config, loader: L) -> Self {
        let mut images = ImageCache::new(loader);
        let sprites = load_sprites(&mut images);
        log::info!("seeding rng with {}", config.seed);

        Self {
            state: compute::init_state(
                config.screen_width,
                config.screen_height,
                sprites,
                config.tuning,
            ),
            images,
            rng: Random::new(config.seed),
            pad: Pad::new(config.autorepeat),
            clock: FrameSync::new(config.frames_per_second, config.max_frameskip),
            canvas: Canvas::new(config.screen_width, config.screen_height),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn images(&self) -> &ImageCache<L> {
        &self.images
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Advance one frame given the buttons currently held.
    pub fn tick(&mut self, held: Buttons) {
        let pad = self.pad.update(held);
        self.state = compute::tick(&self.state, &pad, &mut self.rng);
    }

    /// Render the current state into the off-screen canvas.
    pub fn draw(&mut self) {
        display::render(&mut self.canvas, &self.state, &self.images);
    }

    /// Tick with `held`, then redraw the canvas unless the previous frame
    /// ran late. Returns whether the canvas was redrawn.
    pub fn frame(&mut self, held: Buttons, last_frame_late: bool) -> bool {
        self.tick(held);
        if last_frame_late {
            return false;
        }
        self.draw();
        true
    }

    /// Run until the player quits, presenting every redrawn frame and then
    /// waiting for the next one. `reports_release` says whether the terminal
    /// delivers key-release events.
    pub fn run<W: Write>(&mut self, out: &mut W, reports_release: bool) -> std::io::Result<()> {
        let mut keys = KeyTracker::new(reports_release);
        let mut last_frame_late = false;
        let mut frame_no: u64 = 0;

        loop {
            frame_no += 1;

            // Drain pending input without blocking
            while event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    keys.handle(key, frame_no);
                }
            }
            if keys.quit_requested() {
                log::info!("quit requested after {} frames", frame_no);
                return Ok(());
            }

            if self.frame(keys.held(frame_no), last_frame_late) {
                let (cols, rows) = terminal::size()?;
                display::present(out, &self.canvas, cols, rows)?;
            } else {
                log::debug!("frame {} late, draw skipped", frame_no);
            }

            last_frame_late = self.clock.sync();
        }
    }

    /// Release every cached image.
    pub fn shutdown(&mut self) {
        self.images.unload_all();
    }
}

/// Load the game's sprites through the cache. Missing files leave a
/// placeholder-sized sprite with no image.
pub fn load_sprites<L: ImageLoader>(images: &mut ImageCache<L>) -> SpriteSet {
    let mut sprite = |path: &str, format: PixelFormat| -> Sprite {
        let Some(handle) = images.load(path, format, LoadFlags::NONE) else {
            return Sprite::placeholder();
        };
        match images.get(handle) {
            Some(image) => Sprite {
                image: Some(handle),
                width: image.width as f32,
                height: image.height as f32,
            },
            None => Sprite::placeholder(),
        }
    };

    SpriteSet {
        ship: sprite(config::SHIP_IMAGE, PixelFormat::Rgba5551),
        beam: sprite(config::BEAM_IMAGE, PixelFormat::Rgba5551),
        enemy: sprite(config::ENEMY_IMAGE, PixelFormat::Rgba5551),
        background: sprite(config::BACKGROUND_IMAGE, PixelFormat::Rgba5551),
        heart: sprite(config::HEART_IMAGE, PixelFormat::Rgba4444),
    }
}
