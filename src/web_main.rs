use crate::session::Session;
use crate::web_renderer::{DomScoreBoard, DomSoundSink, WebRenderer};
use crate::{Game, Renderer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

struct GameLoop {
    session: Session<DomScoreBoard, DomSoundSink>,
    renderer: WebRenderer,
}

impl GameLoop {
    fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let mut renderer = WebRenderer::new("pongCanvas")?;
        renderer.init().map_err(to_js)?;

        let (width, height) = renderer.surface_size();
        let session = Session::new(
            Game::new(width, height),
            DomScoreBoard::new(&document),
            DomSoundSink::new(&document),
        );

        Ok(Self { session, renderer })
    }

    fn render(&mut self) -> Result<(), JsValue> {
        self.renderer.render(&self.session.game).map_err(to_js)
    }

    /// One animation frame: drain input, advance the simulation if running,
    /// redraw.
    fn frame(&mut self) -> Result<(), JsValue> {
        while let Some(input) = self.renderer.poll_input().map_err(to_js)? {
            self.session.handle_input(input);
        }

        self.session.tick();
        self.render()
    }
}

fn to_js(err: std::io::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    web_sys::console::log_1(&"[WASM] Initializing pong...".into());

    let game_loop = Rc::new(RefCell::new(GameLoop::new()?));

    // The field is visible before the start button is pressed
    game_loop.borrow_mut().render()?;

    // One requestAnimationFrame chain lives for the whole page; the session
    // phase decides whether a frame advances the simulation.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    let window = web_sys::window().ok_or("no window")?;
    let game_loop_clone = game_loop.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Err(e) = game_loop_clone.borrow_mut().frame() {
            web_sys::console::error_1(&e);
            return; // Stop scheduling on error
        }

        let window = web_sys::window().unwrap();
        window
            .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref())
            .unwrap();
    }) as Box<dyn FnMut()>));

    window.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref())?;

    web_sys::console::log_1(&"[WASM] Game loop running.".into());

    Ok(())
}
