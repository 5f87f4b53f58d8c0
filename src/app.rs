// DOM glue: looks up the scene's elements, routes pointer and button
// events into the simulation, and owns the requestAnimationFrame loop.
// Everything here mutates state through one Rc<RefCell<App>>; listeners
// run sequentially on the cooperative thread, so borrows never nest.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    console, CanvasRenderingContext2d, Document, Event, EventTarget, HtmlAudioElement,
    HtmlCanvasElement, HtmlElement, MouseEvent, Window,
};

use crate::audio::Music;
use crate::interaction::{self, Interaction};
use crate::rain::HeartRain;
use crate::render::Renderer;
use crate::simulation::Simulation;

pub struct App {
    window: Window,
    canvas: HtmlCanvasElement,
    renderer: Renderer,
    simulation: Simulation,
    interaction: Interaction,
    music: Music,
    rain: HeartRain,
    no_button: HtmlElement,
    yes_button: HtmlElement,
    main_ui: HtmlElement,
    success_screen: HtmlElement,
}

impl App {
    /// Look up the page, build the scene, wire every listener, and start
    /// the frame loop. Fails with a descriptive message when the page is
    /// missing one of the required elements.
    pub fn mount() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = element_by_id(&document, "scene")?;
        let no_button: HtmlElement = element_by_id(&document, "noBtn")?;
        let yes_button: HtmlElement = element_by_id(&document, "yesBtn")?;
        let audio_element: HtmlAudioElement = element_by_id(&document, "bg-music")?;
        let main_ui: HtmlElement = element_by_id(&document, "mainUI")?;
        let success_screen: HtmlElement = element_by_id(&document, "successScreen")?;
        // The restart control is optional; sessions without it simply
        // cannot be replayed.
        let restart_button = document
            .get_element_by_id("restartBtn")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let (width, height) = viewport(&window)?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let mut rng = rand::thread_rng();
        let app = Rc::new(RefCell::new(App {
            window: window.clone(),
            canvas,
            renderer: Renderer::new(context, width, height),
            simulation: Simulation::new(&mut rng),
            interaction: Interaction::new(),
            music: Music::new(audio_element),
            rain: HeartRain::new(),
            no_button,
            yes_button,
            main_ui,
            success_screen,
        }));

        wire(&app, &window, &document, restart_button)?;
        start_frame_loop(&app, &window)?;
        console::log_1(&"heart scene running".into());
        Ok(())
    }

    fn frame(&mut self) {
        let mut rng = rand::thread_rng();
        self.simulation.step(&mut rng);
        if let Err(err) = self.renderer.render(&self.simulation) {
            console::warn_1(&err);
        }
    }

    fn resize(&mut self) -> Result<(), JsValue> {
        let (width, height) = viewport(&self.window)?;
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.renderer.resize(width, height);
        Ok(())
    }

    fn pointer_moved(&mut self, x: f64, y: f64) {
        if let Ok(viewport) = viewport(&self.window) {
            self.simulation.point_at(x, y, viewport);
        }
    }

    /// The no-button was provoked: advance the taunt and jump somewhere
    /// else on screen. Quietly does nothing while celebrating.
    fn dodge(&mut self) -> Result<(), JsValue> {
        let viewport = viewport(&self.window)?;
        let mut rng = rand::thread_rng();
        let dodge = match self.interaction.provoke(viewport, &mut rng) {
            Some(dodge) => dodge,
            None => return Ok(()),
        };

        let style = self.no_button.style();
        style.set_property("position", "fixed")?;
        style.set_property("left", "50%")?;
        style.set_property("top", "50%")?;
        style.set_property(
            "transform",
            &format!("translate({}px, {}px)", dodge.offset_x, dodge.offset_y),
        )?;
        style.set_property("opacity", &dodge.opacity.to_string())?;
        self.no_button.set_inner_text(dodge.phrase);
        self.yes_button
            .style()
            .set_property("transform", &format!("scale({})", dodge.accept_scale))?;
        Ok(())
    }

    /// The accept control fired. One-way: music, layer swap, heart rain,
    /// and the particle explosion, all exactly once.
    fn accept(&mut self) -> Result<(), JsValue> {
        if !self.interaction.accept() {
            return Ok(());
        }
        self.music.start(&self.window);
        let mut rng = rand::thread_rng();
        self.simulation.celebrate(&mut rng);

        let main_style = self.main_ui.style();
        main_style.set_property("transition", "opacity 1s")?;
        main_style.set_property("opacity", "0")?;
        main_style.set_property("pointer-events", "none")?;

        let success_style = self.success_screen.style();
        success_style.set_property("opacity", "1")?;
        success_style.set_property("pointer-events", "auto")?;
        if let Some(headline) = self.success_screen.query_selector("h2")? {
            if let Some(headline) = headline.dyn_ref::<HtmlElement>() {
                headline.style().set_property("transform", "scale(1)")?;
            }
        }

        self.rain.start(&self.window)?;
        Ok(())
    }

    /// Back to a fresh session: new particle field, rain stopped, layers
    /// and buttons restored, music from the top.
    fn reset(&mut self) -> Result<(), JsValue> {
        let mut rng = rand::thread_rng();
        self.simulation.reset(&mut rng);
        self.interaction.reset();
        self.rain.stop(&self.window);
        self.music.restart(&self.window);

        let main_style = self.main_ui.style();
        main_style.set_property("opacity", "1")?;
        main_style.set_property("pointer-events", "auto")?;

        let success_style = self.success_screen.style();
        success_style.set_property("opacity", "0")?;
        success_style.set_property("pointer-events", "none")?;
        if let Some(headline) = self.success_screen.query_selector("h2")? {
            if let Some(headline) = headline.dyn_ref::<HtmlElement>() {
                headline.style().set_property("transform", "scale(0)")?;
            }
        }

        let no_style = self.no_button.style();
        for property in &["position", "left", "top", "transform", "opacity"] {
            no_style.remove_property(property)?;
        }
        self.no_button.set_inner_text(interaction::PHRASES[0]);
        self.yes_button.style().remove_property("transform")?;
        Ok(())
    }
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{} is not the expected element type", id)))
}

fn viewport(window: &Window) -> Result<(f64, f64), JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((width, height))
}

fn listen<F>(target: &EventTarget, event: &str, callback: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn wire(
    app: &Rc<RefCell<App>>,
    window: &Window,
    document: &Document,
    restart_button: Option<HtmlElement>,
) -> Result<(), JsValue> {
    {
        let app = app.clone();
        listen(window, "resize", move |_| {
            if let Err(err) = app.borrow_mut().resize() {
                console::warn_1(&err);
            }
        })?;
    }
    {
        let app = app.clone();
        listen(document, "mousemove", move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                app.borrow_mut()
                    .pointer_moved(mouse.client_x() as f64, mouse.client_y() as f64);
            }
        })?;
    }

    // Any first gesture unlocks audio; start() is idempotent, so the
    // listeners can simply stay attached.
    for gesture in &["click", "touchstart"] {
        let app = app.clone();
        listen(document, gesture, move |_| {
            let app = app.borrow();
            app.music.start(&app.window);
        })?;
    }

    let (no_button, yes_button) = {
        let app = app.borrow();
        (app.no_button.clone(), app.yes_button.clone())
    };
    for provoke in &["mouseover", "click"] {
        let app = app.clone();
        listen(&no_button, provoke, move |_| {
            if let Err(err) = app.borrow_mut().dodge() {
                console::warn_1(&err);
            }
        })?;
    }
    {
        // Touch needs the default suppressed or the tap clicks through to
        // whatever lands under the button's next position.
        let app = app.clone();
        listen(&no_button, "touchstart", move |event| {
            event.prevent_default();
            if let Err(err) = app.borrow_mut().dodge() {
                console::warn_1(&err);
            }
        })?;
    }
    {
        let app = app.clone();
        listen(&yes_button, "click", move |_| {
            if let Err(err) = app.borrow_mut().accept() {
                console::warn_1(&err);
            }
        })?;
    }
    if let Some(restart) = restart_button {
        let app = app.clone();
        listen(&restart, "click", move |_| {
            if let Err(err) = app.borrow_mut().reset() {
                console::warn_1(&err);
            }
        })?;
    }
    Ok(())
}

fn start_frame_loop(app: &Rc<RefCell<App>>, window: &Window) -> Result<(), JsValue> {
    let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let handle = callback.clone();
    let app = app.clone();
    let frame_window = window.clone();
    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        app.borrow_mut().frame();
        if let Some(callback) = handle.borrow().as_ref() {
            if let Err(err) = frame_window.request_animation_frame(callback.as_ref().unchecked_ref())
            {
                console::warn_1(&err);
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(first) = callback.borrow().as_ref() {
        window.request_animation_frame(first.as_ref().unchecked_ref())?;
    }
    Ok(())
}
