//! Edge Siege entry point
//!
//! On the web: wires DOM input to the game, renders with WebGPU and mirrors
//! game events into the HUD. Natively: runs a headless autopilot session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent, Window,
    };

    use edge_siege::Game;
    use edge_siege::platform::{AnimationFrameScheduler, FrameCallback};
    use edge_siege::renderer::{RenderState, ShapeBatch};
    use edge_siege::settings::Settings;
    use edge_siege::sim::{GameEvent, draw_scene};

    /// Everything the page needs, shared by the frame callback and handlers
    struct App {
        game: Game<AnimationFrameScheduler>,
        render_state: RenderState,
        batch: ShapeBatch,
        window: Window,
        document: Document,
        canvas: HtmlCanvasElement,
    }

    impl App {
        fn on_frame(&mut self, time: f64) {
            if self.game.frame(time) > 0 {
                self.render();
            }
            self.apply_events();
        }

        /// Render the current frame
        fn render(&mut self) {
            self.batch.clear();
            self.batch.viewport = self.game.state.bounds;
            draw_scene(
                &self.game.state,
                &mut self.batch,
                self.game.settings().overlay_color(),
            );

            match self.render_state.render(&self.batch) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Mirror pending game events into the DOM
        fn apply_events(&mut self) {
            for event in self.game.drain_events() {
                match event {
                    GameEvent::HudChanged => self.update_hud(),
                    GameEvent::Paused => self.set_hidden("pause-screen", false),
                    GameEvent::Resumed => self.set_hidden("pause-screen", true),
                    GameEvent::GameOver { score } => {
                        self.set_text("final-score", &score.to_string());
                        self.set_hidden("game-over-screen", false);
                    }
                    GameEvent::Restarted => {
                        self.set_hidden("game-over-screen", true);
                        self.set_hidden("pause-screen", true);
                    }
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let hud = self.game.state.hud();
            self.set_text("health-display", &hud.health.to_string());
            self.set_text("bandage-display", &hud.bandages.to_string());
            self.set_text("score-display", &hud.score.to_string());
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("hidden", hidden);
            }
        }

        /// Match the canvas backing store to its CSS size
        fn resize(&mut self) {
            let (bounds, width, height) = canvas_size(&self.window, &self.canvas);
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.render_state.resize(width, height);
            self.game.resize(bounds);
        }
    }

    /// CSS-pixel viewport plus the physical backing size
    fn canvas_size(window: &Window, canvas: &HtmlCanvasElement) -> (Vec2, u32, u32) {
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        (Vec2::new(client_w as f32, client_h as f32), width, height)
    }

    fn js_err(message: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&message.to_string())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Edge Siege starting...");

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()
            .map_err(|_| js_err("#gameCanvas is not a canvas"))?;

        let (bounds, width, height) = canvas_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let mut settings = Settings::load();
        if let Ok(query) = window.location().search() {
            let before = settings.quality;
            settings.apply_query(&query);
            if settings.quality != before {
                settings.save();
            }
        }
        log::info!("Quality: {}", settings.quality.as_str());

        // Initialize WebGPU, falling back to WebGL2
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(js_err)?;

        // The frame callback captures the app, so it is installed after
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let seed = js_sys::Date::now() as u64;
        let scheduler = AnimationFrameScheduler::new(window.clone(), callback.clone());
        let app = Rc::new(RefCell::new(App {
            game: Game::new(seed, bounds, settings, scheduler),
            render_state,
            batch: ShapeBatch::new(bounds),
            window: window.clone(),
            document: document.clone(),
            canvas: canvas.clone(),
        }));
        log::info!("Game initialized with seed: {}", seed);

        {
            let app = app.clone();
            *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                app.borrow_mut().on_frame(time);
            }));
        }

        setup_keyboard(&window, app.clone())?;
        setup_pointer(&window, &canvas, app.clone())?;
        setup_touch_sticks(&document, app.clone())?;
        setup_buttons(&document, app.clone())?;
        setup_window_events(&window, app.clone())?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        {
            let mut app = app.borrow_mut();
            app.apply_events();
            app.game.start();
        }

        log::info!("Edge Siege running!");
        Ok(())
    }

    fn setup_keyboard(window: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut app = app.borrow_mut();
                app.game.key_down(&event.key(), event.repeat());
                app.apply_events();
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_pointer(
        window: &Window,
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        // Mouse move - aim follows the cursor
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                app.borrow_mut().game.input.pointer.pos = pos;
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse down - fire while held
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut app = app.borrow_mut();
                app.game.input.pointer.pos =
                    Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                app.game.input.pointer.down = true;
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse up anywhere releases the trigger
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.input.pointer.down = false;
            });
            window.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Which virtual stick a touch zone drives
    #[derive(Clone, Copy)]
    enum StickZone {
        Move,
        Aim,
    }

    fn setup_touch_sticks(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        for (id, zone) in [
            ("joystick-left", StickZone::Move),
            ("joystick-right", StickZone::Aim),
        ] {
            let Some(el) = document.get_element_by_id(id) else {
                log::debug!("No #{} element, touch stick disabled", id);
                continue;
            };
            let knob = el
                .query_selector(".joystick-stick")
                .ok()
                .flatten()
                .and_then(|k| k.dyn_into::<HtmlElement>().ok());

            // Touch start / move
            let engage = {
                let app = app.clone();
                let el = el.clone();
                let knob = knob.clone();
                Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    let Some(touch) = event.target_touches().get(0) else {
                        return;
                    };
                    let rect = el.get_bounding_client_rect();
                    let center = Vec2::new(
                        (rect.left() + rect.width() / 2.0) as f32,
                        (rect.top() + rect.height() / 2.0) as f32,
                    );
                    let pos = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                    let max_dist = (rect.width() / 2.0) as f32;

                    let mut app = app.borrow_mut();
                    let sticks = &mut app.game.input.touch;
                    let stick = match zone {
                        StickZone::Move => &mut sticks.movement,
                        StickZone::Aim => {
                            sticks.shooting = true;
                            &mut sticks.aim
                        }
                    };
                    stick.engage(pos, center, max_dist);
                    place_knob(knob.as_ref(), stick.dir * max_dist);
                })
            };
            el.add_event_listener_with_callback("touchstart", engage.as_ref().unchecked_ref())?;
            el.add_event_listener_with_callback("touchmove", engage.as_ref().unchecked_ref())?;
            engage.forget();

            // Touch end
            let release = {
                let app = app.clone();
                Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    let mut app = app.borrow_mut();
                    let sticks = &mut app.game.input.touch;
                    match zone {
                        StickZone::Move => sticks.movement.release(),
                        StickZone::Aim => {
                            sticks.aim.release();
                            sticks.shooting = false;
                        }
                    }
                    place_knob(knob.as_ref(), Vec2::ZERO);
                })
            };
            el.add_event_listener_with_callback("touchend", release.as_ref().unchecked_ref())?;
            el.add_event_listener_with_callback("touchcancel", release.as_ref().unchecked_ref())?;
            release.forget();
        }

        Ok(())
    }

    /// Move a stick knob `offset` pixels from the zone center
    fn place_knob(knob: Option<&HtmlElement>, offset: Vec2) {
        if let Some(knob) = knob {
            let transform = format!(
                "translate(calc(-50% + {}px), calc(-50% + {}px))",
                offset.x, offset.y
            );
            let _ = knob.style().set_property("transform", &transform);
        }
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let buttons: [(&str, fn(&mut Game<AnimationFrameScheduler>)); 4] = [
            ("mobile-heal-btn", |game| game.input.request_heal()),
            ("mobile-pause-btn", |game| game.toggle_pause()),
            ("resume-btn", |game| game.resume()),
            ("restart-btn", |game| game.restart()),
        ];

        for (id, action) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                log::debug!("No #{} button", id);
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                let mut app = app.borrow_mut();
                action(&mut app.game);
                app.apply_events();
            });
            // Touch buttons react on touchstart; click covers mouse and keyboard
            let kind = if id.starts_with("mobile-") {
                "touchstart"
            } else {
                "click"
            };
            btn.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_window_events(window: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        // Resize
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().resize();
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur - keys released elsewhere would otherwise stick
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().game.input.release_all();
                log::debug!("Input released (window blur)");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Edge Siege (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    let summary = autopilot::run(seed, autopilot::DEFAULT_FRAMES);
    println!(
        "seed {}: {:?} after {} ticks, score {}, health {}",
        seed, summary.phase, summary.ticks, summary.score, summary.health
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted player for headless smoke runs
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use glam::Vec2;

    use edge_siege::consts::SIM_DT_MS;
    use edge_siege::platform::{ManualScheduler, Scheduler};
    use edge_siege::sim::{GameEvent, GamePhase};
    use edge_siege::{Game, Settings};

    /// Five minutes at 60 fps
    pub const DEFAULT_FRAMES: u32 = 60 * 60 * 5;
    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);
    /// Back away from enemies closer than this
    const KITE_DISTANCE: f32 = 150.0;

    #[derive(Debug, Clone, PartialEq)]
    pub struct Summary {
        pub phase: GamePhase,
        pub ticks: u64,
        pub score: u64,
        pub health: u32,
    }

    pub fn run(seed: u64, max_frames: u32) -> Summary {
        let mut game = Game::new(seed, VIEWPORT, Settings::default(), ManualScheduler::new());
        game.start();

        let mut now = 0.0;
        for _ in 0..max_frames {
            if !game.scheduler().is_pending() {
                break;
            }
            steer(&mut game);
            game.frame(now);
            now += SIM_DT_MS;

            for event in game.drain_events() {
                if let GameEvent::GameOver { score } = event {
                    log::info!("Autopilot died at {:.1}s with score {}", now / 1000.0, score);
                }
            }
        }

        Summary {
            phase: game.state.phase,
            ticks: game.state.time_ticks,
            score: game.state.score,
            health: game.state.player.health,
        }
    }

    /// Shoot the nearest enemy, back away when it gets close, heal when low
    fn steer(game: &mut Game<ManualScheduler>) {
        let player = game.state.player.pos;
        let nearest = game
            .state
            .enemies
            .iter()
            .map(|e| e.pos)
            .min_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)));

        let input = &mut game.input;
        match nearest {
            Some(target) => {
                input.pointer.pos = target;
                input.pointer.down = true;
                if target.distance(player) < KITE_DISTANCE {
                    input.touch.movement.engage(2.0 * player - target, player, KITE_DISTANCE);
                } else {
                    input.touch.movement.release();
                }
            }
            None => {
                input.pointer.down = false;
                input.touch.movement.release();
            }
        }

        let me = &game.state.player;
        if me.health < me.max_health / 2 && me.bandages > 0 {
            game.input.request_heal();
        }
    }

}
