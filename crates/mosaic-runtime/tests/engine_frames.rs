//! Frame-level behaviour of the engine: dispatch, transitions, quit and
//! dirty tracking.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use mosaic_core::event::{Event, KeyCode, MouseEvent};
use mosaic_core::geometry::{Point, Rect};
use mosaic_render::{PixelImage, Rgba};
use mosaic_runtime::clock::ManualClock;
use mosaic_runtime::headless::HeadlessBackend;
use mosaic_runtime::{
    Cmd, Component, ComponentId, Engine, EngineConfig, EngineError, EngineResult, Screen, Sprite,
    Stage,
};
use pretty_assertions::assert_eq;

const DT: Duration = Duration::from_millis(16);
const BG: Rgba = Rgba::rgb(0, 0, 0);
const RED: Rgba = Rgba::rgb(255, 0, 0);

#[derive(Debug, Clone, PartialEq)]
enum Msg {
    Pressed(&'static str),
    Go(&'static str),
}

type Log = Rc<RefCell<Vec<String>>>;

struct Block {
    sprite: Sprite,
    name: &'static str,
}

impl Block {
    fn new(name: &'static str, bounds: Rect, color: Rgba) -> Self {
        let surface = PixelImage::filled(bounds.width, bounds.height, color);
        Self {
            sprite: Sprite::with_surface(bounds.position(), surface),
            name,
        }
    }
}

impl Component<Msg> for Block {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    fn on_click(&mut self, _event: &MouseEvent) -> Cmd<Msg> {
        Cmd::msg(Msg::Pressed(self.name))
    }
}

/// Screen that builds two layers and records what it is told.
struct Recorder {
    name: &'static str,
    log: Log,
    block: Option<ComponentId>,
    switch_on_key: Option<&'static str>,
}

impl Recorder {
    fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: Rc::clone(log),
            block: None,
            switch_on_key: None,
        }
    }

    fn switching_to(mut self, next: &'static str) -> Self {
        self.switch_on_key = Some(next);
        self
    }
}

impl Screen<Msg> for Recorder {
    fn on_init(&mut self, stage: &mut Stage<Msg>) -> EngineResult<()> {
        self.log.borrow_mut().push(format!("{}:init", self.name));
        stage.add_layer(format!("{}-back", self.name), Some(0))?;
        stage.add_layer(format!("{}-front", self.name), Some(1))?;
        let id = stage.add_component(
            &format!("{}-front", self.name),
            Block::new(self.name, Rect::new(2, 2, 4, 4), RED),
        )?;
        self.block = Some(id);
        Ok(())
    }

    fn on_event(
        &mut self,
        _stage: &mut Stage<Msg>,
        _dt: f64,
        events: &[Event],
    ) -> EngineResult<Cmd<Msg>> {
        let switch = events
            .iter()
            .any(|e| matches!(e, Event::Key(k) if k.code == KeyCode::Enter));
        Ok(match (switch, self.switch_on_key) {
            (true, Some(next)) => Cmd::msg(Msg::Go(next)),
            _ => Cmd::none(),
        })
    }

    fn on_message(&mut self, _stage: &mut Stage<Msg>, msg: Msg) -> EngineResult<Cmd<Msg>> {
        self.log.borrow_mut().push(format!("{}:{msg:?}", self.name));
        Ok(match msg {
            Msg::Go(next) => Cmd::set_screen(next),
            Msg::Pressed(_) => Cmd::none(),
        })
    }

    fn on_end(&mut self, _stage: &mut Stage<Msg>) {
        self.log.borrow_mut().push(format!("{}:end", self.name));
    }
}

fn engine_with(log: &Log) -> Engine<Msg> {
    let mut engine = Engine::new(EngineConfig::default().with_size(16, 16).with_background(BG));
    engine
        .add_screen("menu", Recorder::new("menu", log).switching_to("game"))
        .unwrap();
    engine.add_screen("game", Recorder::new("game", log)).unwrap();
    engine.set_screen("menu");
    engine
}

fn entries(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

#[test]
fn first_frame_initialises_screen_and_draws() {
    let log = Log::default();
    let mut engine = engine_with(&log);

    let report = engine.step(&[], DT).unwrap();

    assert!(report.transitioned);
    assert!(report.running);
    assert_eq!(report.frame, 1);
    assert_eq!(engine.screens().current(), Some("menu"));
    assert_eq!(engine.stage().layer_names(), vec!["menu-back", "menu-front"]);
    assert_eq!(engine.frame().pixel(3, 3), Some(RED));
    assert_eq!(engine.frame().pixel(0, 0), Some(BG));
    assert_eq!(entries(&log), vec!["menu:init"]);
}

#[test]
fn click_reaches_screen_as_message() {
    let log = Log::default();
    let mut engine = engine_with(&log);
    engine.step(&[], DT).unwrap();

    engine
        .step(&[Event::mouse_down(3, 3), Event::mouse_up(4, 4)], DT)
        .unwrap();

    assert_eq!(entries(&log), vec!["menu:init", "menu:Pressed(\"menu\")"]);
}

#[test]
fn transition_waits_for_next_frame() {
    let log = Log::default();
    let mut engine = engine_with(&log);
    engine.step(&[], DT).unwrap();

    let report = engine.step(&[Event::key(KeyCode::Enter)], DT).unwrap();
    assert!(!report.transitioned);
    assert_eq!(engine.screens().current(), Some("menu"));
    assert_eq!(engine.screens().pending(), Some("game"));
    assert_eq!(engine.stage().layer_names(), vec!["menu-back", "menu-front"]);
    assert_eq!(engine.frame().pixel(3, 3), Some(RED));

    let report = engine.step(&[], DT).unwrap();
    assert!(report.transitioned);
    assert_eq!(engine.screens().current(), Some("game"));
    assert_eq!(engine.stage().layer_names(), vec!["game-back", "game-front"]);
    assert_eq!(
        entries(&log),
        vec!["menu:init", "menu:Go(\"game\")", "menu:end", "game:init"]
    );
}

#[test]
fn quit_still_draws_the_frame() {
    let log = Log::default();
    let mut engine = engine_with(&log);

    let report = engine.step(&[Event::Quit], DT).unwrap();

    assert!(!report.running);
    assert!(!engine.is_running());
    assert_eq!(engine.frame().pixel(3, 3), Some(RED));
}

#[test]
fn unknown_screen_aborts_the_frame() {
    let log = Log::default();
    let mut engine = engine_with(&log);
    engine.step(&[], DT).unwrap();
    engine.set_screen("credits");

    let err = engine.step(&[], DT).unwrap_err();

    assert!(matches!(err, EngineError::ScreenNotFound(ref name) if name == "credits"));
}

#[test]
fn unknown_screen_leaves_the_stage_intact() {
    let log = Log::default();
    let mut engine = engine_with(&log);
    engine.step(&[], DT).unwrap();
    let current = engine.screens().current().map(str::to_owned);
    let layers: Vec<String> = engine
        .stage()
        .layer_names()
        .into_iter()
        .map(str::to_owned)
        .collect();

    engine.set_screen("credits");
    assert!(engine.step(&[], DT).is_err());

    assert_eq!(engine.screens().current().map(str::to_owned), current);
    assert_eq!(engine.stage().layer_names(), layers);
    let report = engine.step(&[], DT).unwrap();
    assert!(!report.transitioned);
    assert_eq!(engine.frame().pixel(3, 3), Some(RED));
}

#[test]
fn dirty_region_covers_old_and_new_positions() {
    let log = Log::default();
    let mut engine = engine_with(&log);

    let first = engine.step(&[], DT).unwrap();
    assert_eq!(first.dirty.as_slice(), &[Rect::from_size(16, 16)]);

    let still = engine.step(&[], DT).unwrap();
    assert_eq!(still.dirty.as_slice(), &[Rect::new(2, 2, 4, 4)]);

    let id = engine
        .stage()
        .layer("menu-front")
        .and_then(|layer| layer.ids().next())
        .unwrap();
    engine
        .stage_mut()
        .get_mut::<Block>(id)
        .unwrap()
        .sprite_mut()
        .set_position(Point::new(10, 2));

    let moved = engine.step(&[], DT).unwrap();
    assert_eq!(moved.dirty.len(), 2);
    assert!(moved.dirty.iter().any(|r| *r == Rect::new(10, 2, 4, 4)));
    assert!(moved.dirty.iter().any(|r| *r == Rect::new(2, 2, 4, 4)));
    assert_eq!(engine.frame().pixel(3, 3), Some(BG));
}

#[test]
fn resize_forces_full_redraw() {
    let log = Log::default();
    let mut engine = engine_with(&log);
    engine.step(&[], DT).unwrap();

    let report = engine
        .step(&[Event::Resize { width: 24, height: 8 }], DT)
        .unwrap();

    assert_eq!(report.dirty.as_slice(), &[Rect::from_size(24, 8)]);
    assert_eq!(engine.stage().size().width, 24);
    assert_eq!(engine.frame().size().height, 8);
}

#[test]
fn headless_run_presents_every_frame_until_quit() {
    let log = Log::default();
    let mut engine = engine_with(&log);
    let mut backend = HeadlessBackend::new(16, 16)
        .with_script([vec![], vec![Event::key(KeyCode::Enter)]])
        .with_idle_frames(1);
    let mut clock = ManualClock::new();

    engine.run(&mut backend, &mut clock).unwrap();

    // Two scripted frames, one idle frame, then the quit frame.
    assert_eq!(backend.presents().len(), 4);
    assert_eq!(engine.screens().current(), Some("game"));
    assert_eq!(
        backend.last_frame().and_then(|img| img.get(3, 3)),
        Some(RED)
    );
    assert!(!engine.is_running());
}
