//! End-to-end runs of the game screens against scripted input.

use std::time::Duration;

use mosaic_core::event::{Event, KeyCode};
use mosaic_demo::app::{self, CREDITS, GAME, LEVELS, MENU, Msg};
use mosaic_demo::art;
use mosaic_demo::components::ScrambledImage;
use mosaic_demo::config::PuzzleConfig;
use mosaic_puzzle::generate;
use mosaic_render::{PixelImage, TileCoord, TileGrid};
use mosaic_runtime::clock::ManualClock;
use mosaic_runtime::headless::HeadlessBackend;
use mosaic_runtime::{Component, Engine, EngineConfig};
use pretty_assertions::assert_eq;

const DT: Duration = Duration::from_millis(100);

fn picture() -> PixelImage {
    art::picture(64, 64)
}

fn engine(seed: u64) -> Engine<Msg> {
    let config = EngineConfig::default().with_size(80, 48).with_fps(10);
    app::build_engine(config, PuzzleConfig::default().with_seed(seed), picture()).unwrap()
}

fn press(engine: &mut Engine<Msg>, code: KeyCode) {
    engine.step(&[Event::key(code)], DT).unwrap();
}

fn idle(engine: &mut Engine<Msg>, frames: usize) {
    for _ in 0..frames {
        engine.step(&[], DT).unwrap();
    }
}

fn puzzle_image(engine: &Engine<Msg>) -> &ScrambledImage {
    let id = engine
        .stage()
        .layer("image")
        .and_then(|layer| layer.ids().next())
        .expect("image layer populated");
    engine.stage().get::<ScrambledImage>(id).expect("scrambled image")
}

fn enter_game(engine: &mut Engine<Msg>) {
    idle(engine, 1);
    assert_eq!(engine.screens().current(), Some(MENU));
    press(engine, KeyCode::Enter);
    idle(engine, 1);
    assert_eq!(engine.screens().current(), Some(GAME));
}

#[test]
fn menu_play_opens_the_game() {
    let mut engine = engine(3);
    enter_game(&mut engine);
    assert_eq!(engine.stage().layer_names(), vec!["image", "buttons"]);
    assert_eq!(engine.stage().layer("buttons").map(|l| l.len()), Some(7));
}

#[test]
fn flip_hotkey_is_self_inverse() {
    let mut engine = engine(3);
    enter_game(&mut engine);
    let before = puzzle_image(&engine).grid().clone();

    press(&mut engine, KeyCode::Char('q'));
    let flipped = puzzle_image(&engine).grid().clone();
    assert_ne!(flipped, before);

    press(&mut engine, KeyCode::Char('q'));
    assert_eq!(puzzle_image(&engine).grid(), &before);
}

#[test]
fn arrows_then_swap_with_anchor() {
    let mut engine = engine(5);
    enter_game(&mut engine);
    let before = puzzle_image(&engine).grid().clone();

    press(&mut engine, KeyCode::Char('e'));
    assert_eq!(puzzle_image(&engine).anchor(), Some(TileCoord::new(0, 0)));
    press(&mut engine, KeyCode::Right);
    press(&mut engine, KeyCode::Down);
    assert_eq!(puzzle_image(&engine).selected(), TileCoord::new(1, 1));
    press(&mut engine, KeyCode::Char('e'));

    let image = puzzle_image(&engine);
    assert_eq!(image.anchor(), None);
    let a = TileCoord::new(0, 0);
    let b = TileCoord::new(1, 1);
    assert_eq!(image.grid().tile(a), before.tile(b));
    assert_eq!(image.grid().tile(b), before.tile(a));
}

#[test]
fn solve_restores_the_picture_even_after_edits() {
    let mut engine = engine(42);
    enter_game(&mut engine);
    press(&mut engine, KeyCode::Char('w'));

    press(&mut engine, KeyCode::Char('s'));
    // Eight steps at 150 ms each, fed 100 ms per frame.
    idle(&mut engine, 14);

    let solved = TileGrid::from_image(&picture(), 16).unwrap();
    assert_eq!(puzzle_image(&engine).grid(), &solved);
}

#[test]
fn filter_grays_the_selected_tile_and_solve_still_restores() {
    let mut engine = engine(42);
    enter_game(&mut engine);
    let before = puzzle_image(&engine).grid().clone();

    press(&mut engine, KeyCode::Char('f'));
    let grid = puzzle_image(&engine).grid();
    let tile = grid.tile(TileCoord::new(0, 0)).unwrap();
    for y in 0..tile.height() {
        for x in 0..tile.width() {
            let px = tile.get(x, y).unwrap();
            assert!(px.r == px.g && px.g == px.b, "({x}, {y}) is {px:?}");
        }
    }
    let other = TileCoord::new(1, 0);
    assert_eq!(grid.tile(other), before.tile(other));

    press(&mut engine, KeyCode::Char('s'));
    idle(&mut engine, 14);
    let solved = TileGrid::from_image(&picture(), 16).unwrap();
    assert_eq!(puzzle_image(&engine).grid(), &solved);
}

#[test]
fn chosen_level_sets_the_difficulty() {
    let mut engine = engine(11);
    idle(&mut engine, 1);
    press(&mut engine, KeyCode::Char('l'));
    idle(&mut engine, 1);
    assert_eq!(engine.screens().current(), Some(LEVELS));
    assert_eq!(engine.stage().layer_names(), vec!["labels", "buttons"]);
    // Ten levels plus Back.
    assert_eq!(engine.stage().layer("buttons").map(|l| l.len()), Some(11));

    press(&mut engine, KeyCode::Char('3'));
    idle(&mut engine, 1);
    assert_eq!(engine.screens().current(), Some(GAME));

    let mut expected = TileGrid::from_image(&picture(), 16).unwrap();
    let puzzle = generate(&mut expected, 3, Some(11)).unwrap();
    assert_eq!(puzzle_image(&engine).grid(), &expected);
    assert_eq!(puzzle.puzzle_tiles(), &expected);
}

#[test]
fn levels_back_returns_to_menu() {
    let mut engine = engine(4);
    idle(&mut engine, 1);
    press(&mut engine, KeyCode::Char('l'));
    idle(&mut engine, 1);
    assert_eq!(engine.screens().current(), Some(LEVELS));
    press(&mut engine, KeyCode::Escape);
    idle(&mut engine, 1);
    assert_eq!(engine.screens().current(), Some(MENU));
}

#[test]
fn credits_round_trip_through_the_menu() {
    let mut engine = engine(6);
    idle(&mut engine, 1);
    press(&mut engine, KeyCode::Char('c'));
    idle(&mut engine, 1);
    assert_eq!(engine.screens().current(), Some(CREDITS));
    assert_eq!(engine.stage().layer_names(), vec!["credits", "buttons"]);
    assert!(engine.stage().layer("credits").is_some_and(|l| l.len() > 1));

    press(&mut engine, KeyCode::Escape);
    idle(&mut engine, 1);
    assert_eq!(engine.screens().current(), Some(MENU));
    assert_eq!(engine.stage().layer("buttons").map(|l| l.len()), Some(4));
}

#[test]
fn back_returns_to_menu() {
    let mut engine = engine(1);
    enter_game(&mut engine);
    press(&mut engine, KeyCode::Escape);
    idle(&mut engine, 1);
    assert_eq!(engine.screens().current(), Some(MENU));
    assert_eq!(engine.stage().layer_names(), vec!["buttons"]);
}

#[test]
fn clicking_a_tile_selects_it() {
    let mut engine = engine(9);
    enter_game(&mut engine);
    let image = puzzle_image(&engine);
    let bounds = image.sprite().bounds();
    let target = TileCoord::new(2, 3);
    let rect = image.tile_rect(target);
    let x = bounds.x + rect.x + rect.width / 2;
    let y = bounds.y + rect.y + rect.height / 2;

    engine
        .step(&[Event::mouse_down(x, y), Event::mouse_up(x, y)], DT)
        .unwrap();

    assert_eq!(puzzle_image(&engine).selected(), target);
}

#[test]
fn headless_run_quits_from_the_menu() {
    let mut engine = engine(2);
    let mut backend = HeadlessBackend::new(80, 48)
        .with_script([vec![], vec![Event::key(KeyCode::Escape)]])
        .quit_when_exhausted(false);

    engine.run(&mut backend, &mut ManualClock::new()).unwrap();

    assert_eq!(backend.presents().len(), 2);
    assert!(!engine.is_running());
}
