//! Classic Pong entry point
//!
//! On the web this attaches to the page's canvas and runs the frame loop on
//! `requestAnimationFrame`. Native builds have no window; they run a
//! headless demo match and print the final state.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use classic_pong::platform::web::{CanvasRenderer, WebAudio, listen_keyboard};
    use classic_pong::platform::{KeyboardState, PlatformError};
    use classic_pong::sim::GamePhase;
    use classic_pong::{FramePacer, Session, Settings};

    const CANVAS_ID: &str = "canvas";

    /// Everything the frame loop needs
    struct App {
        session: Session,
        pacer: FramePacer,
        renderer: CanvasRenderer,
        audio: WebAudio,
        keys: Rc<RefCell<KeyboardState>>,
    }

    impl App {
        /// Run however many fixed-rate frames are due at `time` (ms)
        fn update(&mut self, time: f64) {
            let now = time / 1000.0;
            let due = self.pacer.frames_due(now);
            for _ in 0..due {
                let mut keys = self.keys.borrow_mut();
                self.session.frame(now, &*keys, &mut self.renderer, &mut self.audio);
                keys.end_frame();
            }
        }
    }

    pub fn run() -> Result<(), PlatformError> {
        console_error_panic_hook::set_once();
        // Logger may already be set on hot reload
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("{} starting...", classic_pong::consts::TITLE);

        let settings = Settings::load();
        let renderer = CanvasRenderer::attach(CANVAS_ID)?;
        let audio = WebAudio::load(&settings)?;
        let keys = Rc::new(RefCell::new(KeyboardState::new()));
        listen_keyboard(keys.clone())?;

        let app = Rc::new(RefCell::new(App {
            session: Session::from_settings(&settings),
            pacer: FramePacer::default(),
            renderer,
            audio,
            keys,
        }));

        setup_auto_pause(app.clone())?;
        request_animation_frame(app);

        log::info!("Pong running! W/S and Up/Down move, P pauses, R resets");
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Window went away, stopping");
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

    /// Pause when the tab loses focus mid-rally
    fn setup_auto_pause(app: Rc<RefCell<App>>) -> Result<(), PlatformError> {
        let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut app = app.borrow_mut();
            let game = app.session.game_mut();
            if game.phase == GamePhase::Run {
                game.toggle_pause();
                log::info!("Auto-paused (window blur)");
            }
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {e}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Length of the native demo match, in simulated seconds
#[cfg(not(target_arch = "wasm32"))]
const DEMO_SECONDS: u32 = 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use classic_pong::consts::TARGET_FPS;
    use classic_pong::platform::KeyboardState;
    use classic_pong::platform::headless::{RecordingRenderer, SilentAudio};
    use classic_pong::{Session, Settings};

    env_logger::init();
    log::info!("Pong (native) starting...");
    log::info!("Native mode has no window - build for wasm32 to play. Running a headless demo.");

    let settings = Settings::load();
    let mut session = Session::from_settings(&settings);
    let keys = KeyboardState::new();
    let mut renderer = RecordingRenderer::new();
    let mut audio = SilentAudio::new();

    let frames = DEMO_SECONDS * TARGET_FPS;
    for frame in 0..frames {
        let now = f64::from(frame) / f64::from(TARGET_FPS);
        session.frame(now, &keys, &mut renderer, &mut audio);
    }

    let game = session.game();
    log::info!(
        "Demo over after {} frames: {} - {} ({} sounds)",
        session.frames(),
        game.left.points,
        game.right.points,
        audio.played.len()
    );

    match serde_json::to_string_pretty(game) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize final state: {e}"),
    }
}
