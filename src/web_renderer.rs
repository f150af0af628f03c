use crate::entity::BALL_SIZE;
use crate::game::Game;
use crate::renderer::{Input, Renderer};
use crate::session::{ScoreBoard, Sound, SoundSink};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, Document, Element, HtmlAudioElement,
    HtmlCanvasElement, MouseEvent, TouchEvent,
};

// Colors (classic table palette)
const COLOR_PLAYER_PADDLE: &str = "#FFD700";
const COLOR_AI_PADDLE: &str = "#00BFFF";
const COLOR_BALL: &str = "#FFF";
const COLOR_CENTER_LINE: &str = "#444";

type InputQueue = Rc<RefCell<VecDeque<Input>>>;

pub struct WebRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    document: Document,
    pending_input: InputQueue,
}

impl WebRenderer {
    pub fn new(canvas_id: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            canvas,
            context,
            document,
            pending_input: Rc::new(RefCell::new(VecDeque::new())),
        })
    }

    /// Field dimensions come from the canvas attributes, fixed at startup.
    pub fn surface_size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn push_input(queue: &InputQueue, input: Input) {
        let mut queue = queue.borrow_mut();
        // Pointer positions coalesce; only the newest matters
        if let (Some(Input::PointerMove(_)), Input::PointerMove(_)) = (queue.back(), input) {
            queue.pop_back();
        }
        queue.push_back(input);
    }

    fn setup_mouse_listener(&self) {
        let queue = self.pending_input.clone();
        let canvas = self.canvas.clone();

        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            let rect = canvas.get_bounding_client_rect();
            let y = event.client_y() as f64 - rect.top();
            Self::push_input(&queue, Input::PointerMove(y as f32));
        }) as Box<dyn FnMut(MouseEvent)>);

        self.canvas
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
            .unwrap();
        closure.forget();
    }

    fn setup_touch_listener(&self) {
        let queue = self.pending_input.clone();
        let canvas = self.canvas.clone();

        let closure = Closure::wrap(Box::new(move |event: TouchEvent| {
            // Registered non-passive so this actually suppresses scrolling
            event.prevent_default();
            if let Some(touch) = event.touches().item(0) {
                let rect = canvas.get_bounding_client_rect();
                let y = touch.client_y() as f64 - rect.top();
                Self::push_input(&queue, Input::PointerMove(y as f32));
            }
        }) as Box<dyn FnMut(TouchEvent)>);

        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        self.canvas
            .add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .unwrap();
        closure.forget();
    }

    /// Wire one control button to an input event. Registered once at init;
    /// the session's phase machine decides whether the event applies.
    fn setup_button(&self, id: &str, input: Input) {
        let Some(button) = self.document.get_element_by_id(id) else {
            return;
        };
        let queue = self.pending_input.clone();

        let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
            Self::push_input(&queue, input);
        }) as Box<dyn FnMut(MouseEvent)>);

        button
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .unwrap();
        closure.forget();
    }
}

impl Renderer for WebRenderer {
    fn init(&mut self) -> io::Result<()> {
        self.setup_mouse_listener();
        self.setup_touch_listener();
        self.setup_button("start", Input::Start);
        self.setup_button("end", Input::End);
        self.setup_button("reset", Input::Reset);
        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        let ctx = &self.context;
        let (w, h) = (game.width as f64, game.height as f64);

        ctx.clear_rect(0.0, 0.0, w, h);

        // Paddles
        let left = game.left_paddle.rect();
        ctx.set_fill_style_str(COLOR_PLAYER_PADDLE);
        ctx.fill_rect(left.x as f64, left.y as f64, left.w as f64, left.h as f64);

        let right = game.right_paddle.rect();
        ctx.set_fill_style_str(COLOR_AI_PADDLE);
        ctx.fill_rect(
            right.x as f64,
            right.y as f64,
            right.w as f64,
            right.h as f64,
        );

        // Ball, centered in its bounding box
        let radius = (BALL_SIZE / 2.0) as f64;
        ctx.set_fill_style_str(COLOR_BALL);
        ctx.begin_path();
        ctx.arc(
            game.ball.x as f64 + radius,
            game.ball.y as f64 + radius,
            radius,
            0.0,
            std::f64::consts::PI * 2.0,
        )
        .unwrap();
        ctx.fill();

        // Dashed middle line
        ctx.set_stroke_style_str(COLOR_CENTER_LINE);
        let dashes = js_sys::Array::of2(&JsValue::from_f64(10.0), &JsValue::from_f64(10.0));
        ctx.set_line_dash(&dashes).unwrap();
        ctx.begin_path();
        ctx.move_to(w / 2.0, 0.0);
        ctx.line_to(w / 2.0, h);
        ctx.stroke();
        ctx.set_line_dash(&js_sys::Array::new()).unwrap();

        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        // Listeners live as long as the page; nothing to restore
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        Ok(self.pending_input.borrow_mut().pop_front())
    }
}

/// Score and level counters displayed as DOM text.
pub struct DomScoreBoard {
    player_el: Option<Element>,
    cpu_el: Option<Element>,
    level_el: Option<Element>,
    player: u32,
    cpu: u32,
    level: u32,
}

impl DomScoreBoard {
    pub fn new(document: &Document) -> Self {
        Self {
            player_el: document.get_element_by_id("player-score"),
            cpu_el: document.get_element_by_id("cpu-score"),
            level_el: document.get_element_by_id("number-level"),
            player: 0,
            cpu: 0,
            level: 0,
        }
    }

    fn show(el: &Option<Element>, value: u32) {
        if let Some(el) = el {
            el.set_text_content(Some(&value.to_string()));
        }
    }
}

impl ScoreBoard for DomScoreBoard {
    fn player_point(&mut self) {
        self.player += 1;
        Self::show(&self.player_el, self.player);
    }

    fn cpu_point(&mut self) {
        self.cpu += 1;
        Self::show(&self.cpu_el, self.cpu);
    }

    fn level_up(&mut self) {
        self.level += 1;
        Self::show(&self.level_el, self.level);
    }

    fn reset(&mut self) {
        self.player = 0;
        self.cpu = 0;
        self.level = 0;
        Self::show(&self.player_el, 0);
        Self::show(&self.cpu_el, 0);
        Self::show(&self.level_el, 0);
    }
}

/// The page's audio elements; playback is fire-and-forget and a rejected
/// play() is dropped.
pub struct DomSoundSink {
    start: Option<HtmlAudioElement>,
    success: Option<HtmlAudioElement>,
    fail: Option<HtmlAudioElement>,
}

impl DomSoundSink {
    pub fn new(document: &Document) -> Self {
        let audio = |id: &str| {
            document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok())
        };
        Self {
            start: audio("audio-start"),
            success: audio("audio-success"),
            fail: audio("audio-fail"),
        }
    }
}

impl SoundSink for DomSoundSink {
    fn play(&mut self, sound: Sound) {
        let el = match sound {
            Sound::Start => &self.start,
            Sound::Success => &self.success,
            Sound::Fail => &self.fail,
        };
        if let Some(el) = el {
            let _ = el.play();
        }
    }
}
