// Background music with a software fade-in. Autoplay policies can reject
// play(); the rejection is logged and swallowed, and the started flag is
// dropped again so the next user gesture re-attempts playback.

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, HtmlAudioElement, Window};

pub struct Music {
    element: HtmlAudioElement,
    started: Rc<Cell<bool>>,
    fade_handle: Rc<Cell<Option<i32>>>,
}

impl Music {
    const FADE_STEP: f64 = 0.03;
    const FADE_INTERVAL_MS: i32 = 120;
    /// Volume snaps to 1.0 once the ramp crosses this.
    const FADE_CEILING: f64 = 0.9;

    pub fn new(element: HtmlAudioElement) -> Music {
        element.set_autoplay(false);
        element.set_volume(0.0);
        Music {
            element,
            started: Rc::new(Cell::new(false)),
            fade_handle: Rc::new(Cell::new(None)),
        }
    }

    /// Start playback with a ramped volume. No-op once started; must be
    /// called from a user gesture the first time or the host will reject
    /// the play request.
    pub fn start(&self, window: &Window) {
        if self.started.get() {
            return;
        }
        self.started.set(true);

        let promise = match self.element.play() {
            Ok(promise) => promise,
            Err(err) => {
                self.started.set(false);
                console::warn_2(&"audio blocked:".into(), &err);
                return;
            }
        };

        let on_play = {
            let window = window.clone();
            let element = self.element.clone();
            let handle = self.fade_handle.clone();
            Closure::once(move |_: JsValue| {
                begin_fade(&window, element, handle);
            })
        };
        let on_blocked = {
            let started = self.started.clone();
            Closure::once(move |err: JsValue| {
                started.set(false);
                console::warn_2(&"audio blocked:".into(), &err);
            })
        };
        let _ = promise.then(&on_play).catch(&on_blocked);
        on_play.forget();
        on_blocked.forget();
    }

    /// Rewind to the top and start again with a fresh fade-in.
    pub fn restart(&self, window: &Window) {
        if let Some(id) = self.fade_handle.take() {
            window.clear_interval_with_handle(id);
        }
        if let Err(err) = self.element.pause() {
            console::warn_1(&err);
        }
        self.element.set_current_time(0.0);
        self.element.set_volume(0.0);
        self.started.set(false);
        self.start(window);
    }
}

fn begin_fade(window: &Window, element: HtmlAudioElement, handle: Rc<Cell<Option<i32>>>) {
    let tick = Closure::wrap(Box::new({
        let window = window.clone();
        let element = element.clone();
        let handle = handle.clone();
        move || {
            if element.volume() < Music::FADE_CEILING {
                element.set_volume((element.volume() + Music::FADE_STEP).min(1.0));
            } else {
                element.set_volume(1.0);
                if let Some(id) = handle.take() {
                    window.clear_interval_with_handle(id);
                }
            }
        }
    }) as Box<dyn FnMut()>);

    match window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        Music::FADE_INTERVAL_MS,
    ) {
        Ok(id) => handle.set(Some(id)),
        Err(err) => console::warn_1(&err),
    }
    tick.forget();
}
