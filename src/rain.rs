// Decorative heart rain for the celebration: an interval spawns emoji
// drops, each drop removes itself after its fall. Only the interval handle
// is tracked; the drops clean up on their own.

use js_sys::Math;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, Document, HtmlElement, Window};

pub struct HeartRain {
    handle: Option<i32>,
}

impl HeartRain {
    const GLYPHS: [&'static str; 4] = ["\u{2764}\u{fe0f}", "\u{1f496}", "\u{1f495}", "\u{1f497}"];
    const SPAWN_INTERVAL_MS: i32 = 100;
    const LIFETIME_MS: i32 = 5000;

    pub fn new() -> HeartRain {
        HeartRain { handle: None }
    }

    pub fn start(&mut self, window: &Window) -> Result<(), JsValue> {
        if self.handle.is_some() {
            return Ok(());
        }
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let spawn = {
            let window = window.clone();
            Closure::wrap(Box::new(move || {
                if let Err(err) = spawn_heart(&window, &document) {
                    console::warn_1(&err);
                }
            }) as Box<dyn FnMut()>)
        };
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            spawn.as_ref().unchecked_ref(),
            HeartRain::SPAWN_INTERVAL_MS,
        )?;
        spawn.forget();
        self.handle = Some(id);
        Ok(())
    }

    pub fn stop(&mut self, window: &Window) {
        if let Some(id) = self.handle.take() {
            window.clear_interval_with_handle(id);
        }
    }
}

impl Default for HeartRain {
    fn default() -> Self {
        HeartRain::new()
    }
}

fn spawn_heart(window: &Window, document: &Document) -> Result<(), JsValue> {
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;

    let heart: HtmlElement = document.create_element("div")?.dyn_into()?;
    heart.set_class_name("heart-rain");
    let glyph = HeartRain::GLYPHS[(Math::random() * HeartRain::GLYPHS.len() as f64) as usize
        % HeartRain::GLYPHS.len()];
    heart.set_inner_text(glyph);

    let style = heart.style();
    style.set_property("left", &format!("{}vw", Math::random() * 100.0))?;
    style.set_property("font-size", &format!("{}px", Math::random() * 20.0 + 10.0))?;
    style.set_property("animation-duration", &format!("{}s", Math::random() * 2.0 + 3.0))?;
    body.append_child(&heart)?;

    let remove = Closure::once_into_js(move || {
        heart.remove();
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        remove.unchecked_ref(),
        HeartRain::LIFETIME_MS,
    )?;
    Ok(())
}
