//! Tile Recall entry point
//!
//! Wires the game to the page and runs the animation loop on the web; runs a
//! scripted headless round on native.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlInputElement, MouseEvent};

    use tile_recall::consts::MAX_FRAME_DT;
    use tile_recall::platform::web::{DomLayout, WebTimers, query_param, session_seed};
    use tile_recall::render::{dom, project};
    use tile_recall::sim::{ClickOutcome, Game};
    use tile_recall::{GameConfig, Settings, Timeline, config};

    /// Game instance holding all state
    struct App {
        game: Game<Timeline, WebTimers>,
        settings: Settings,
        document: Document,
        last_time: f64,
    }

    impl App {
        /// Push the current state to the page
        fn refresh(&self) {
            let view = project(self.game.state(), &self.settings);
            dom::apply_view(&self.document, &view);
        }

        fn start(&mut self) {
            if let Err(e) = self.game.start(&DomLayout) {
                log::warn!("Could not start: {}", e);
            }
            self.refresh();
        }

        fn click(&mut self, number: u32) {
            match self.game.handle_click(number) {
                ClickOutcome::Ignored => {}
                _ => self.refresh(),
            }
        }

        fn change_count(&mut self, input: &str) {
            let applied = config::parse_tile_count(input)
                .and_then(|count| self.game.change_tile_count(count));
            match applied {
                Ok(()) => {
                    let count = self.game.state().tile_count;
                    if let Err(e) = dom::build_tiles(&self.document, count) {
                        log::error!("Failed to rebuild tiles: {:?}", e);
                    }
                    self.settings.tile_count = count;
                    self.settings.save();
                }
                Err(e) => {
                    log::warn!("{}", e);
                    dom::set_count_input(&self.document, self.game.state().tile_count);
                }
            }
            self.refresh();
        }

        /// Per-frame work: deliver timers, move tiles
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            let fired = self.game.timers_mut().drain_fired();
            let mut changed = false;
            for handle in fired {
                changed |= self.game.on_timer(handle);
            }
            if changed {
                self.refresh();
            }

            self.game.animator_mut().advance(dt.min(MAX_FRAME_DT));
            dom::apply_positions(&self.document, self.game.animator());
        }
    }

    fn load_config(settings: &Settings) -> GameConfig {
        let base = GameConfig {
            tile_count: settings.tile_count,
            ..GameConfig::default()
        };
        match base.with_overrides(query_param) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring query overrides: {}", e);
                base
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Tile Recall starting...");

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let settings = Settings::load();
        let config = load_config(&settings);
        let seed = session_seed();
        let game = Game::new(config, seed, Timeline::new(), WebTimers::new())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        dom::build_tiles(&document, config.tile_count)?;
        dom::set_count_input(&document, config.tile_count);

        let app = Rc::new(RefCell::new(App {
            game,
            settings,
            document: document.clone(),
            last_time: 0.0,
        }));
        app.borrow().refresh();

        log::info!("Game initialized with seed: {}", seed);

        setup_start_button(&document, app.clone());
        setup_tile_clicks(&document, app.clone());
        setup_count_input(&document, app.clone());
        setup_toolbar(&document, app.clone());

        request_animation_frame(app);

        log::info!("Tile Recall running!");
        Ok(())
    }

    fn on_click<F>(document: &Document, id: &str, handler: F)
    where
        F: FnMut(MouseEvent) + 'static,
    {
        if let Some(el) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(MouseEvent)>::new(handler);
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("#{} not found, control disabled", id);
        }
    }

    fn setup_start_button(document: &Document, app: Rc<RefCell<App>>) {
        on_click(document, "start", move |event: MouseEvent| {
            event.prevent_default();
            app.borrow_mut().start();
        });
    }

    fn setup_tile_clicks(document: &Document, app: Rc<RefCell<App>>) {
        // Delegated: tiles are rebuilt whenever the count changes
        on_click(document, "tiles", move |event: MouseEvent| {
            event.prevent_default();
            let number = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(".tile").ok().flatten())
                .and_then(|tile| tile.get_attribute("data-number"))
                .and_then(|n| n.parse::<u32>().ok());
            if let Some(number) = number {
                app.borrow_mut().click(number);
            }
        });
    }

    fn setup_count_input(document: &Document, app: Rc<RefCell<App>>) {
        let Some(el) = document.get_element_by_id("count") else {
            log::warn!("#count not found, tile count fixed");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            let value = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value());
            if let Some(value) = value {
                app.borrow_mut().change_count(&value);
            }
        });
        let _ = el.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_toolbar(document: &Document, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            on_click(document, "toggle-exp", move |event: MouseEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                a.settings.toggle_experimental();
                a.settings.save();
                a.refresh();
            });
        }
        {
            let app = app.clone();
            on_click(document, "outlines", move |event: MouseEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                a.settings.toggle_outlines();
                a.settings.save();
                a.refresh();
            });
        }
        {
            let app = app.clone();
            on_click(document, "pause", move |event: MouseEvent| {
                event.prevent_default();
                app.borrow_mut().game.pause();
                log::info!("Movement paused");
            });
        }
        on_click(document, "resume", move |event: MouseEvent| {
            event.prevent_default();
            app.borrow_mut().game.resume();
            log::info!("Movement resumed");
        });
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().update(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tile Recall (native) starting...");
    log::info!("Native mode plays one scripted round - run with `trunk serve` for the web version");

    if let Err(e) = demo::play_round() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::time::Duration;

    use tile_recall::sim::{FixedLayout, Game, ManualTimers, Size, Stage};
    use tile_recall::{GameConfig, GameError, Timeline};

    const FRAME: f32 = 1.0 / 60.0;

    /// Start a round, let the learning phase elapse at 60 fps, then click
    /// every tile in order.
    pub fn play_round() -> Result<(), GameError> {
        let layout = FixedLayout {
            boundary: Size::new(800, 600),
            tile: Size::new(80, 80),
        };
        let config = GameConfig::default();
        let mut game = Game::new(config, 2024, Timeline::new(), ManualTimers::new())?;
        game.start(&layout)?;

        let mut frames = 0u32;
        while game.state().stage == Stage::Learning {
            let fired = game.timers_mut().advance(Duration::from_secs_f32(FRAME));
            for handle in fired {
                game.on_timer(handle);
            }
            game.animator_mut().advance(FRAME);
            frames += 1;
        }
        log::info!("Numbers hidden after {} frames", frames);

        for (tile, pos) in game.animator().positions() {
            log::info!("Tile {} at ({:.0}, {:.0})", tile, pos.x, pos.y);
        }

        for number in 1..=game.state().tile_count {
            let outcome = game.handle_click(number);
            log::info!("Clicked {}: {:?}", number, outcome);
        }

        println!(
            "Round over: {} ({})",
            game.state().outcome.label(),
            game.state().stage.as_str()
        );
        Ok(())
    }
}
