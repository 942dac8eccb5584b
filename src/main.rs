//! Flappy Gap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy_gap::highscores::format_record;
    use flappy_gap::persistence::{MemoryStorage, Storage, StorageError, WebStorage};
    use flappy_gap::platform::BrowserClock;
    use flappy_gap::renderer::RenderState;
    use flappy_gap::sim::{Bird, Obstacle, Playfield};
    use flappy_gap::{BootOutcome, Game, LoopControl, RenderHook, Settings};

    /// Used until (or if never) the GPU surface is ready
    struct NoRender;

    impl RenderHook for NoRender {
        fn render(&mut self, _bird: &Bird, _obstacles: &[Obstacle], _score: u32) {}
    }

    /// Game instance plus host-side state
    struct App {
        game: Game,
        render_state: Option<RenderState>,
        /// Guards against a second frame loop after a quick restart
        loop_running: bool,
    }

    impl App {
        fn frame(&mut self) -> LoopControl {
            let control = match self.render_state.as_mut() {
                Some(render_state) => self.game.frame(render_state),
                None => self.game.frame(&mut NoRender),
            };
            self.update_hud();
            control
        }

        fn redraw(&mut self) {
            match self.render_state.as_mut() {
                Some(render_state) => self.game.redraw(render_state),
                None => self.game.redraw(&mut NoRender),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let document = web_sys::window().unwrap().document().unwrap();
            let state = self.game.state();

            set_text(&document, "hud-score", &format!("Score: {}", state.score));

            match self.game.countdown() {
                Some(n) => {
                    set_text(&document, "countdown", &n.to_string());
                    set_visible(&document, "countdown", true);
                }
                None => set_visible(&document, "countdown", false),
            }
            set_visible(&document, "go-banner", self.game.is_announcing());

            let over = state.is_game_over();
            set_visible(&document, "game-over", over);
            if over {
                set_text(&document, "final-score", &state.score.to_string());
            }

            set_visible(&document, "start-btn", !state.started);
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn open_store(store: Result<WebStorage, StorageError>, name: &str) -> Box<dyn Storage> {
        match store {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{} unavailable ({}), keeping data in memory", name, e);
                Box::new(MemoryStorage::new())
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Gap starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Canvas fills the window; the playfield keeps this size for the run
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0) as u32;
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        let playfield = Playfield::new(width as f32, height as f32);

        let session_store = open_store(WebStorage::session(), "sessionStorage");
        let score_store = open_store(WebStorage::local(), "localStorage");
        let settings = Settings::load(score_store.as_ref());

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(
            playfield,
            settings,
            session_store,
            score_store,
            Box::new(BrowserClock),
            seed,
        );
        let app = Rc::new(RefCell::new(App {
            game,
            render_state: None,
            loop_running: false,
        }));

        // Initialize WebGPU (falls back to WebGL)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::default(),
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height, playfield).await {
                            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Failed to create device: {}", e),
                        }
                    }
                    Err(e) => log::error!("No graphics adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        setup_input_handlers(&canvas, app.clone());
        setup_buttons(app.clone());

        let outcome = app.borrow_mut().game.boot();
        {
            let mut a = app.borrow_mut();
            a.redraw();
            a.update_hud();
        }
        if outcome == BootOutcome::Resumed {
            start_loop(app);
        }

        log::info!("Flappy Gap running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().game.jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: any key flaps
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if !event.repeat() {
                    app.borrow_mut().game.jump();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        {
            let app = app.clone();
            on_click(&document, "start-btn", move || {
                let started = app.borrow_mut().game.start_new_game();
                if started {
                    app.borrow().update_hud();
                    start_loop(app.clone());
                }
            });
        }

        {
            let app = app.clone();
            on_click(&document, "restart-btn", move || {
                let restarted = {
                    let mut a = app.borrow_mut();
                    let restarted = a.game.restart();
                    if restarted {
                        a.redraw();
                        a.update_hud();
                    }
                    restarted
                };
                if restarted {
                    start_loop(app.clone());
                }
            });
        }

        {
            let app = app.clone();
            on_click(&document, "records-btn", move || show_records(&app.borrow().game));
        }

        on_click(&document, "records-close", || {
            let document = web_sys::window().unwrap().document().unwrap();
            set_visible(&document, "records-modal", false);
        });
    }

    fn show_records(game: &Game) {
        let document = web_sys::window().unwrap().document().unwrap();
        let Some(list) = document.get_element_by_id("records-list") else {
            return;
        };
        list.set_inner_html("");

        let history = game.history();
        let lines: Vec<String> = match history.best() {
            None => vec!["No records available.".to_string()],
            Some(best) => std::iter::once(format!("Best: {}", best))
                .chain(history.iter().map(format_record))
                .collect(),
        };
        for line in lines {
            if let Ok(item) = document.create_element("li") {
                item.set_text_content(Some(&line));
                let _ = list.append_child(&item);
            }
        }

        set_visible(&document, "records-modal", true);
    }

    fn start_loop(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            if a.loop_running {
                return;
            }
            a.loop_running = true;
        }
        request_animation_frame(app);
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        let control = app.borrow_mut().frame();
        match control {
            LoopControl::Continue => request_animation_frame(app),
            LoopControl::Stop => {
                app.borrow_mut().loop_running = false;
                log::info!("Frame loop stopped");
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Gap (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use flappy_gap::highscores::format_record;
    use flappy_gap::persistence::{FileStorage, MemoryStorage};
    use flappy_gap::platform::{Clock, ManualClock, SystemClock};
    use flappy_gap::sim::{Bird, GameState, Obstacle, Playfield};
    use flappy_gap::{BootOutcome, Game, LoopControl, RenderHook, Settings};

    const RUNS: usize = 3;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// The autopilot stops flapping after this many ticks so every run ends
    const MAX_TICKS: u64 = 60 * 60;
    const DATA_DIR: &str = ".flappy-gap";

    /// Simulated frame time, real wall-clock timestamps
    struct HeadlessClock {
        frames: ManualClock,
        wall: SystemClock,
    }

    impl Clock for HeadlessClock {
        fn now_ms(&self) -> f64 {
            self.frames.now_ms()
        }

        fn timestamp(&self) -> String {
            self.wall.timestamp()
        }
    }

    #[derive(Default)]
    struct TickLog {
        ticks: u64,
    }

    impl RenderHook for TickLog {
        fn render(&mut self, bird: &Bird, obstacles: &[Obstacle], score: u32) {
            self.ticks += 1;
            if self.ticks % 300 == 0 {
                log::debug!(
                    "tick {}: y={:.1} vel={:.1} obstacles={} score={}",
                    self.ticks,
                    bird.pos.y,
                    bird.vel,
                    obstacles.len(),
                    score
                );
            }
        }
    }

    /// Flap when the bird is about to sink below the next gap
    fn should_jump(state: &GameState) -> bool {
        let bird = &state.bird;
        let floor = state
            .obstacles
            .iter()
            .find(|o| o.right() > bird.left())
            .map(|o| o.bottom_top(&state.playfield) - 10.0)
            .unwrap_or(state.playfield.height * 0.6);
        bird.vel > 0.0 && bird.bottom() + bird.vel + bird.gravity > floor
    }

    pub fn run() {
        let durable = FileStorage::new(DATA_DIR);
        log::info!("Score history stored in {}", durable.dir().display());
        let settings = Settings::load(&durable);

        let frames = ManualClock::new(0.0);
        let clock = HeadlessClock {
            frames: frames.clone(),
            wall: SystemClock::default(),
        };
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);

        let mut game = Game::new(
            Playfield::new(800.0, 600.0),
            settings,
            Box::new(MemoryStorage::new()),
            Box::new(durable),
            Box::new(clock),
            seed,
        );

        if game.boot() == BootOutcome::ShowStart {
            game.start_new_game();
        }

        for run in 1..=RUNS {
            if run > 1 {
                game.restart();
            }
            let mut render = TickLog::default();
            loop {
                if game.state().time_ticks < MAX_TICKS && should_jump(game.state()) {
                    game.jump();
                }
                let control = game.frame(&mut render);
                frames.advance(FRAME_MS);
                if control == LoopControl::Stop {
                    break;
                }
            }
            println!(
                "Run {}: score {} after {} ticks",
                run,
                game.score(),
                game.state().time_ticks
            );
        }

        let history = game.history();
        println!("\nScore history (newest first):");
        for record in history.iter() {
            println!("  {}", format_record(record));
        }
        if let Some(best) = history.best() {
            println!("Best: {}", best);
        }
    }
}
