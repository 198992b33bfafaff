//! Browser backend: canvas 2D drawing, `<audio>` sound effects, DOM keyboard
//! listeners.

use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::TAU;
use std::rc::Rc;

use glam::IVec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlAudioElement, HtmlCanvasElement, KeyboardEvent};

use super::{
    Audio, Color, Key, KeyboardState, PlatformError, Renderer, SoundEffect, SoundFailures,
};
use crate::consts::{HEIGHT, WIDTH};
use crate::settings::Settings;

/// Draws onto a `<canvas>` through its 2D context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Attach to the canvas with the given element id and size it to the court
    pub fn attach(canvas_id: &str) -> Result<Self, PlatformError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(PlatformError::NoWindow)?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .and_then(|el| el.dyn_into().ok())
            .ok_or_else(|| PlatformError::NoCanvas(canvas_id.to_owned()))?;

        canvas.set_width(WIDTH as u32);
        canvas.set_height(HEIGHT as u32);

        let ctx = canvas
            .get_context("2d")
            .map_err(|e| PlatformError::NoContext(format!("{e:?}")))?
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| PlatformError::NoContext("2d context unsupported".into()))?;

        log::info!("Canvas `{canvas_id}` attached ({WIDTH}x{HEIGHT})");
        Ok(Self { ctx })
    }
}

impl Renderer for CanvasRenderer {
    fn begin(&mut self) {
        self.ctx.save();
    }

    fn end(&mut self) {
        self.ctx.restore();
    }

    fn clear_background(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(0.0, 0.0, f64::from(WIDTH), f64::from(HEIGHT));
    }

    fn draw_line(&mut self, from: IVec2, to: IVec2, color: Color) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(1.0);
        self.ctx.begin_path();
        // Half-pixel offset keeps 1px lines crisp
        self.ctx.move_to(f64::from(from.x) + 0.5, f64::from(from.y) + 0.5);
        self.ctx.line_to(f64::from(to.x) + 0.5, f64::from(to.y) + 0.5);
        self.ctx.stroke();
    }

    fn draw_rectangle(&mut self, pos: IVec2, size: IVec2, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(
            f64::from(pos.x),
            f64::from(pos.y),
            f64::from(size.x),
            f64::from(size.y),
        );
    }

    fn draw_circle(&mut self, center: IVec2, radius: i32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            f64::from(center.x),
            f64::from(center.y),
            f64::from(radius),
            0.0,
            TAU,
        );
        self.ctx.fill();
    }

    fn draw_text(&mut self, text: &str, pos: IVec2, size: i32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.set_font(&format!("{size}px monospace"));
        self.ctx.set_text_baseline("top");
        for (i, line) in text.lines().enumerate() {
            let y = pos.y + size * i as i32;
            let _ = self.ctx.fill_text(line, f64::from(pos.x), f64::from(y));
        }
    }
}

/// One preloaded `<audio>` element per effect
///
/// Elements fetch in the background. A file that fails to load is logged
/// once and that effect stays silent; the game keeps running.
pub struct WebAudio {
    sounds: HashMap<SoundEffect, HtmlAudioElement>,
    failures: Rc<RefCell<SoundFailures>>,
    on_play_rejected: Closure<dyn FnMut(JsValue)>,
}

impl WebAudio {
    /// Load every effect listed in the settings
    pub fn load(settings: &Settings) -> Result<Self, PlatformError> {
        let volume = f64::from(settings.effective_volume());
        let failures = Rc::new(RefCell::new(SoundFailures::new()));
        let mut sounds = HashMap::new();
        for effect in SoundEffect::ALL {
            let path = settings.sounds.path(effect);
            let element =
                HtmlAudioElement::new_with_src(path).map_err(|e| PlatformError::SoundLoad {
                    path: path.to_owned(),
                    reason: format!("{e:?}"),
                })?;
            watch_load_errors(&element, effect, path, failures.clone());
            element.set_preload("auto");
            element.set_volume(volume);
            sounds.insert(effect, element);
        }

        // Autoplay policy or a broken file rejects the play() promise
        let on_play_rejected = Closure::<dyn FnMut(JsValue)>::new(|reason: JsValue| {
            log::warn!("Sound playback rejected: {reason:?}");
        });

        log::info!("Loading {} sounds (volume {volume:.2})", sounds.len());
        Ok(Self {
            sounds,
            failures,
            on_play_rejected,
        })
    }
}

/// Log the element's `error` event and mark the effect as failed
fn watch_load_errors(
    element: &HtmlAudioElement,
    effect: SoundEffect,
    path: &str,
    failures: Rc<RefCell<SoundFailures>>,
) {
    let path = path.to_owned();
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        if let Some(err) = failures
            .borrow_mut()
            .record(effect, &path, "could not fetch or decode")
        {
            log::error!("{err}");
        }
    });
    let _ = element.add_event_listener_with_callback("error", closure.as_ref().unchecked_ref());
    closure.forget();
}

impl Audio for WebAudio {
    fn play(&mut self, effect: SoundEffect) {
        if self.failures.borrow().has_failed(effect) {
            return;
        }
        let Some(element) = self.sounds.get(&effect) else {
            return;
        };
        // Restart if still playing from a previous hit
        element.set_current_time(0.0);
        match element.play() {
            Ok(promise) => {
                let _ = promise.catch(&self.on_play_rejected);
            }
            Err(e) => log::warn!("Could not play {effect:?}: {e:?}"),
        }
    }
}

impl Drop for WebAudio {
    fn drop(&mut self) {
        for element in self.sounds.values() {
            let _ = element.pause();
            let _ = element.remove_attribute("src");
        }
    }
}

/// Feed DOM `keydown`/`keyup`/`blur` events into a shared [`KeyboardState`]
pub fn listen_keyboard(keys: Rc<RefCell<KeyboardState>>) -> Result<(), PlatformError> {
    let window = web_sys::window().ok_or(PlatformError::NoWindow)?;

    {
        let keys = keys.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(key) = Key::from_code(&event.code()) {
                event.prevent_default();
                keys.borrow_mut().key_down(key);
            }
        });
        let _ = window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let keys = keys.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(key) = Key::from_code(&event.code()) {
                keys.borrow_mut().key_up(key);
            }
        });
        let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Keys released while unfocused never send keyup
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            keys.borrow_mut().release_all();
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    Ok(())
}
