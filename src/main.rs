//! Seesaw entry point
//!
//! Handles platform-specific initialization and wires the page to the engine.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, MouseEvent};

    use seesaw_sim::audio::AudioManager;
    use seesaw_sim::hud::HudView;
    use seesaw_sim::persistence::KeyValueStore;
    use seesaw_sim::platform::{default_store, session_seed};
    use seesaw_sim::{SeededSource, SeesawEngine, Settings};

    /// App instance holding all state
    struct App {
        engine: SeesawEngine,
        store: Box<dyn KeyValueStore>,
        settings: Settings,
        audio: AudioManager,
    }

    impl App {
        fn new() -> Self {
            let store = default_store();
            let settings = Settings::load(&store);
            let seed = session_seed();
            let engine = SeesawEngine::initialize(&store, SeededSource::seeded(seed));
            log::info!("Engine initialized with seed: {}", seed);

            Self {
                engine,
                store,
                audio: AudioManager::new(settings.effective_volume()),
                settings,
            }
        }

        fn drop_at(&mut self, offset: f64) {
            let outcome = self.engine.drop_at(offset);
            self.engine.save(&mut self.store);
            if self.settings.effective_volume() > 0.0 {
                self.audio.play_drop(outcome.mass);
            }
        }

        fn reset(&mut self) {
            self.engine.reset();
            self.engine.clear_saved(&mut self.store);
        }

        /// Write the current view into the DOM
        fn update_hud(&self, document: &Document) {
            let view = HudView::build(&self.engine, self.settings.history_limit);

            set_text(document, "leftTotal", &view.left_total);
            set_text(document, "rightTotal", &view.right_total);
            set_text(document, "tiltAngle", &view.tilt_angle);
            set_text(document, "nextWeight", &view.next_weight);

            let Some(wrapper) = document.get_element_by_id("plankWrapper") else {
                return;
            };
            if let Some(el) = wrapper.dyn_ref::<HtmlElement>() {
                let _ = el.style().set_property("transform", &view.plank_transform);
            }

            // Redraw markers from scratch
            if let Ok(old) = wrapper.query_selector_all(".dropped-object") {
                for i in 0..old.length() {
                    if let Some(node) = old.item(i) {
                        if let Some(el) = node.dyn_ref::<Element>() {
                            el.remove();
                        }
                    }
                }
            }
            for marker in &view.markers {
                let Ok(div) = document.create_element("div") else {
                    continue;
                };
                div.set_class_name("dropped-object");
                div.set_text_content(Some(&marker.label));
                if let Some(el) = div.dyn_ref::<HtmlElement>() {
                    let style = el.style();
                    let size = format!("{}px", marker.size_px);
                    let _ = style.set_property("left", &marker.left);
                    let _ = style.set_property("background-color", &marker.color);
                    let _ = style.set_property("width", &size);
                    let _ = style.set_property("height", &size);
                }
                let _ = wrapper.append_child(&div);
            }

            if let Some(log_box) = document.get_element_by_id("logList") {
                let html: String = view
                    .log
                    .iter()
                    .map(|line| format!("<div class=\"log-entry\">{}</div>", line))
                    .collect();
                log_box.set_inner_html(&html);
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {}", e).into());
        }

        log::info!("Seesaw starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let app = Rc::new(RefCell::new(App::new()));
        app.borrow().update_hud(&document);

        setup_plank_click(&document, app.clone())?;
        setup_reset_button(&document, app)?;

        log::info!("Seesaw running!");
        Ok(())
    }

    fn setup_plank_click(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let plank = document.get_element_by_id("plank").ok_or("no #plank")?;
        let plank_clone = plank.clone();
        let document = document.clone();

        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = plank_clone.get_bounding_client_rect();
            let offset = event.client_x() as f64 - rect.left() - rect.width() / 2.0;

            let mut a = app.borrow_mut();
            a.drop_at(offset);
            a.update_hud(&document);
        });
        plank.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_reset_button(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id("resetBtn") else {
            log::warn!("No #resetBtn on page");
            return Ok(());
        };
        let document = document.clone();

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut a = app.borrow_mut();
            if a.settings.confirm_reset {
                let confirmed = web_sys::window()
                    .and_then(|w| w.confirm_with_message("Reset simulation?").ok())
                    .unwrap_or(false);
                if !confirmed {
                    return;
                }
            }
            a.reset();
            a.update_hud(&document);
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Seesaw (native) starting...");
    log::info!("Native mode runs a scripted demo - build for wasm32 for the web version");

    run_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn run_demo() {
    use seesaw_sim::hud::HudView;
    use seesaw_sim::platform::{default_store, session_seed};
    use seesaw_sim::{SeededSource, SeesawEngine, Settings};

    let mut store = default_store();
    let settings = Settings::load(&store);
    let mut engine = SeesawEngine::initialize(&store, SeededSource::seeded(session_seed()));

    for offset in [-120.0, 45.0, 80.5, -10.0, 150.0] {
        let out = engine.drop_at(offset);
        engine.save(&mut store);
        println!(
            "{:>2}kg @ {:>7.1}px  L {:>5.1}  R {:>5.1}  tilt {:>5.1}°",
            out.mass,
            offset,
            out.physics.left_mass,
            out.physics.right_mass,
            out.physics.final_angle
        );
    }

    let view = HudView::build(&engine, settings.history_limit);
    println!("\nNext weight: {}kg", view.next_weight);
    for line in &view.log {
        println!("  {}", line);
    }

    engine.reset();
    engine.clear_saved(&mut store);
    log::info!("Demo finished");
}
