//! Block Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use block_dodge::consts::*;
    use block_dodge::hud::{self, FONT_FAMILY, Hud, Label, TextMeasure};
    use block_dodge::renderer::RenderState;
    use block_dodge::sim::{Autopilot, GameEvent, GameLoop, GameState, LoopEvent};
    use block_dodge::{ConfigError, GameConfig, GameError, Preset};

    fn js_err(e: JsValue) -> GameError {
        GameError::Platform(format!("{:?}", e))
    }

    /// Measures text by laying it out in a hidden span
    struct DomMetrics {
        probe: HtmlElement,
    }

    impl TextMeasure for DomMetrics {
        fn measure(&self, text: &str, font_size: f32) -> Vec2 {
            self.probe.set_text_content(Some(text));
            set_style(&self.probe, "font-size", &format!("{}px", font_size));
            Vec2::new(
                self.probe.offset_width() as f32,
                self.probe.offset_height() as f32,
            )
        }
    }

    /// Game instance holding all state
    struct Game {
        game: GameLoop,
        hud: Hud,
        render_state: Option<RenderState>,
        metrics: DomMetrics,
        score_el: HtmlElement,
        game_over_el: HtmlElement,
        autopilot: Option<Autopilot>,
    }

    impl Game {
        /// Apply one loop event and reflect its outcome in the labels
        fn handle(&mut self, event: LoopEvent) {
            let events = self.game.dispatch(event);
            let mut changed = false;
            for event in &events {
                changed |= self.hud.apply(event, &self.metrics);
                if let GameEvent::GameOver { score, .. } = event {
                    log::info!("Game over with score {}", score);
                }
            }
            if changed {
                self.sync_labels();
            }
        }

        /// Per-frame callback: autopilot input, one tick, draw
        fn frame(&mut self) {
            if let Some(pilot) = self.autopilot.as_mut() {
                if !self.game.state().is_game_over() {
                    let events = pilot.update(self.game.state());
                    for event in events {
                        self.handle(event);
                    }
                }
            }
            self.handle(LoopEvent::Frame);
            self.render();
        }

        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.game.state()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn toggle_autopilot(&mut self) {
            match self.autopilot.take() {
                Some(mut pilot) => {
                    for event in pilot.release() {
                        self.handle(event);
                    }
                    log::info!("Autopilot off");
                }
                None => {
                    self.autopilot = Some(Autopilot::new());
                    log::info!("Autopilot on");
                }
            }
        }

        /// Start a new run with a fresh seed, keeping the config
        fn restart(&mut self) {
            let seed = js_sys::Date::now() as u64;
            let config = self.game.state().config.clone();
            self.hud = Hud::new(&config, &self.metrics);
            self.game.reset(GameState::new(config, seed));
            if let Some(pilot) = self.autopilot.as_mut() {
                pilot.release();
            }
            self.sync_labels();
            log::info!("Game restarted with seed: {}", seed);
        }

        /// Push label text and positions to the DOM
        fn sync_labels(&self) {
            place_label(&self.score_el, &self.hud.score);
            match &self.hud.game_over {
                Some(label) => {
                    place_label(&self.game_over_el, label);
                    set_style(&self.game_over_el, "display", "block");
                }
                None => set_style(&self.game_over_el, "display", "none"),
            }
        }
    }

    /// Set one style property, logging failures instead of dropping them
    fn set_style(el: &HtmlElement, name: &str, value: &str) {
        if let Err(e) = el.style().set_property(name, value) {
            log::warn!("Failed to set {} = {} on label: {:?}", name, value, e);
        }
    }

    fn place_label(el: &HtmlElement, label: &Label) {
        el.set_text_content(Some(&label.text));
        set_style(el, "font-size", &format!("{}px", label.font_size));
        set_style(el, "color", &hud::css_color(label.color));
        set_style(el, "left", &format!("{}px", label.pos.x));
        set_style(el, "top", &format!("{}px", label.pos.y));
    }

    /// Absolutely positioned text span inside the container
    fn create_label(document: &Document, container: &Element) -> Result<HtmlElement, GameError> {
        let el: HtmlElement = document
            .create_element("span")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| GameError::Platform("span is not an HtmlElement".to_string()))?;
        let style = el.style();
        for (name, value) in [
            ("position", "absolute"),
            ("font-family", FONT_FAMILY),
            ("white-space", "nowrap"),
            ("line-height", "1.15"),
            ("pointer-events", "none"),
        ] {
            style.set_property(name, value).map_err(js_err)?;
        }
        container.append_child(&el).map_err(js_err)?;
        Ok(el)
    }

    /// Preset from the `?preset=` query, falling back to classic
    fn config_from_url(window: &web_sys::Window) -> Result<GameConfig, GameError> {
        let search = window.location().search().map_err(js_err)?;
        let params = web_sys::UrlSearchParams::new_with_str(&search).map_err(js_err)?;
        let preset = match params.get("preset") {
            Some(name) => Preset::from_str(&name).ok_or(ConfigError::UnknownPreset(name))?,
            None => Preset::default(),
        };
        log::info!("Using {} preset", preset.as_str());
        Ok(GameConfig::from_preset(preset))
    }

    pub async fn run() -> Result<(), GameError> {
        let window = web_sys::window().ok_or_else(|| GameError::Platform("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| GameError::Platform("no document".into()))?;

        let config = config_from_url(&window)?;
        config.validate()?;

        let container = document
            .get_element_by_id(CONTAINER_ID)
            .ok_or_else(|| GameError::ContainerMissing(CONTAINER_ID.to_string()))?;
        log::info!("Found game container element");

        // Canvas backing store is scaled; CSS size stays in field pixels
        let resolution = config
            .resolution
            .unwrap_or_else(|| window.device_pixel_ratio() as f32);
        let width = (config.field_width * resolution).round() as u32;
        let height = (config.field_height * resolution).round() as u32;

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| GameError::Platform("not a canvas".to_string()))?;
        canvas.set_width(width);
        canvas.set_height(height);
        {
            let style = canvas.style();
            for (name, value) in [
                ("width", format!("{}px", config.field_width)),
                ("height", format!("{}px", config.field_height)),
                ("display", "block".to_string()),
            ] {
                style.set_property(name, &value).map_err(js_err)?;
            }
        }
        container
            .set_attribute("style", &hud::container_style())
            .map_err(js_err)?;
        container.append_child(&canvas).map_err(js_err)?;
        log::info!("Canvas added to game container ({}x{})", width, height);

        // Labels share the canvas origin, inside the container's border
        let score_el = create_label(&document, &container)?;
        let game_over_el = create_label(&document, &container)?;
        let probe = create_label(&document, &container)?;
        probe
            .style()
            .set_property("visibility", "hidden")
            .map_err(js_err)?;
        let metrics = DomMetrics { probe };

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| GameError::DisplayInit(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| GameError::DisplayInit(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let field = Vec2::new(config.field_width, config.field_height);
        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            field,
            config.background_color,
        )
        .await?;

        let seed = js_sys::Date::now() as u64;
        let spawn_interval_ms = config.spawn_interval_ms;
        let hud = Hud::new(&config, &metrics);
        let game = Rc::new(RefCell::new(Game {
            game: GameLoop::new(GameState::new(config, seed)),
            hud,
            render_state: Some(render_state),
            metrics,
            score_el,
            game_over_el,
            autopilot: None,
        }));
        game.borrow().sync_labels();
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&window, game.clone())?;
        setup_spawn_timer(&window, game.clone(), spawn_interval_ms)?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Game loop started");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), GameError> {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if key == KEY_LEFT || key == KEY_RIGHT {
                    // Keep arrows from scrolling the page
                    event.prevent_default();
                }

                let mut g = game.borrow_mut();
                match key.as_str() {
                    "i" | "I" => g.toggle_autopilot(),
                    "Enter" if g.game.state().is_game_over() => g.restart(),
                    _ => {}
                }
                g.handle(LoopEvent::KeyDown(key));
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .map_err(js_err)?;
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().handle(LoopEvent::KeyUp(event.key()));
            });
            window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())
                .map_err(js_err)?;
            closure.forget();
        }

        Ok(())
    }

    /// Wall-clock spawn source, independent of the frame loop
    fn setup_spawn_timer(
        window: &web_sys::Window,
        game: Rc<RefCell<Game>>,
        interval_ms: u32,
    ) -> Result<(), GameError> {
        let closure = Closure::<dyn FnMut()>::new(move || {
            game.borrow_mut().handle(LoopEvent::Spawn);
        });
        window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                i32::try_from(interval_ms).unwrap_or(i32::MAX),
            )
            .map_err(js_err)?;
        closure.forget();
        log::info!("Block spawn interval set ({} ms)", interval_ms);
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    log::info!("Starting game initialization...");

    if let Err(e) = wasm_game::run().await {
        log::error!("Error during game initialization: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use clap::Parser;

    /// Run the game headless on a simulated clock
    #[derive(Parser, Debug)]
    #[command(name = "block-dodge", version)]
    pub struct Args {
        #[arg(short, long, default_value = "classic", help = "Layout preset (classic or wide)")]
        pub preset: String,

        #[arg(
            short,
            long,
            value_name = "FILE",
            help = "JSON game config; replaces the preset"
        )]
        pub config: Option<PathBuf>,

        #[arg(long, help = "Spawn RNG seed (defaults to the current time)")]
        pub seed: Option<u64>,

        #[arg(long, default_value_t = 36_000, help = "Stop after this many frames")]
        pub frames: u64,

        #[arg(long, default_value_t = 60, help = "Simulated frame rate")]
        pub fps: u32,

        #[arg(short, long, help = "Let the autopilot steer")]
        pub autopilot: bool,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Block Dodge (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    if let Err(e) = run_headless() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run_headless() -> Result<(), block_dodge::GameError> {
    use clap::Parser;

    use block_dodge::platform::HeadlessRun;
    use block_dodge::sim::GameState;
    use block_dodge::{ConfigError, GameConfig, GameError, Preset};

    let args = cli::Args::parse();

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|e| {
                GameError::Platform(format!("reading {}: {}", path.display(), e))
            })?;
            GameConfig::from_json(&json)?
        }
        None => {
            let preset = Preset::from_str(&args.preset)
                .ok_or_else(|| ConfigError::UnknownPreset(args.preset.clone()))?;
            GameConfig::from_preset(preset)
        }
    };
    config.validate()?;

    let seed = args.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });
    log::info!(
        "Field {}x{}, seed {}, {} fps",
        config.field_width,
        config.field_height,
        seed,
        args.fps
    );

    let mut run = HeadlessRun::new(GameState::new(config, seed), args.fps);
    if args.autopilot {
        run = run.with_autopilot();
    }
    let summary = run.run_until_game_over(args.frames);

    if summary.game_over {
        log::info!("Game over after {} frames", summary.frames);
    } else {
        log::info!("Frame limit reached");
    }
    println!(
        "score: {}  frames: {}  time: {:.1}s  spawned: {}  {}",
        summary.score,
        summary.frames,
        summary.elapsed_ms / 1000.0,
        summary.spawned,
        if summary.game_over { "game over" } else { "survived" }
    );

    Ok(())
}
