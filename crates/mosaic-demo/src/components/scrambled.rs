#![forbid(unsafe_code)]

//! The puzzle picture: a tile grid stretched to its bounds, with the
//! selected tile and the swap anchor outlined.

use mosaic_core::event::{KeyCode, KeyEvent, MouseEvent};
use mosaic_core::geometry::{Point, Rect};
use mosaic_render::{PixelImage, Rgba, ShapeError, TileCoord, TileGrid, ops};
use mosaic_runtime::{Cmd, Component, Fit, Sprite};

use crate::app::Msg;
use crate::config::PuzzleConfig;

/// Outline colours and thickness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineStyle {
    pub thickness: u32,
    pub selected: Rgba,
    pub anchor: Rgba,
}

impl From<&PuzzleConfig> for OutlineStyle {
    fn from(config: &PuzzleConfig) -> Self {
        Self {
            thickness: config.outline_thickness,
            selected: config.outline_color,
            anchor: config.anchor_color,
        }
    }
}

/// Interactive view over a live [`TileGrid`].
///
/// Input never mutates the grid directly: clicks and arrow keys send
/// [`Msg::Select`] and the owning screen applies it. After changing the grid
/// through [`grid_mut`](Self::grid_mut), call [`render`](Self::render).
#[derive(Debug, Clone)]
pub struct ScrambledImage {
    sprite: Sprite,
    grid: TileGrid,
    selected: TileCoord,
    anchor: Option<TileCoord>,
    style: OutlineStyle,
}

impl ScrambledImage {
    /// Shown at the grid's native size until [`fit`](Self::fit) is called.
    pub fn new(grid: TileGrid, style: OutlineStyle) -> Result<Self, ShapeError> {
        let size = grid.pixel_size();
        let mut image = Self {
            sprite: Sprite::new(Rect::from_size(size.width, size.height)),
            grid,
            selected: TileCoord::default(),
            anchor: None,
            style,
        };
        image.render()?;
        Ok(image)
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut TileGrid {
        &mut self.grid
    }

    /// Swap in another grid, keeping the selection when it still fits.
    pub fn set_grid(&mut self, grid: TileGrid) -> Result<(), ShapeError> {
        self.grid = grid;
        if !self.grid.contains(self.selected) {
            self.selected = TileCoord::default();
        }
        self.anchor = None;
        self.render()
    }

    pub fn selected(&self) -> TileCoord {
        self.selected
    }

    /// Select a tile. Returns false if it is outside the grid.
    pub fn select(&mut self, coord: TileCoord) -> bool {
        if !self.grid.contains(coord) {
            return false;
        }
        self.selected = coord;
        true
    }

    pub fn anchor(&self) -> Option<TileCoord> {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: Option<TileCoord>) {
        self.anchor = anchor.filter(|c| self.grid.contains(*c));
    }

    /// Stretch into `bounds`.
    pub fn fit(&mut self, bounds: Rect) -> Result<(), ShapeError> {
        self.sprite.set_bounds(bounds);
        self.render()
    }

    /// On-screen rectangle of a tile, relative to the sprite.
    pub fn tile_rect(&self, coord: TileCoord) -> Rect {
        let size = self.sprite.size();
        let tiles = self.grid.dimensions();
        if tiles.is_empty() {
            return Rect::default();
        }
        let x0 = coord.x * size.width / tiles.width;
        let x1 = (coord.x + 1) * size.width / tiles.width;
        let y0 = coord.y * size.height / tiles.height;
        let y1 = (coord.y + 1) * size.height / tiles.height;
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Tile under a frame position.
    pub fn tile_at(&self, point: Point) -> Option<TileCoord> {
        let local = self.sprite.to_local(point)?;
        let size = self.sprite.size();
        let tiles = self.grid.dimensions();
        if tiles.is_empty() {
            return None;
        }
        let x = (local.x * tiles.width / size.width).min(tiles.width - 1);
        let y = (local.y * tiles.height / size.height).min(tiles.height - 1);
        Some(TileCoord::new(x, y))
    }

    /// Rebuild the surface from the grid and the outlines.
    pub fn render(&mut self) -> Result<(), ShapeError> {
        let size = self.sprite.size();
        let picture = ops::stretch(&self.grid.to_image(), size);
        let mut marks = PixelImage::new(size.width, size.height);
        let mut outline = |coord: TileCoord, color: Rgba| {
            let rect = self.tile_rect(coord);
            let frame = ops::outline_rect(rect.size(), color, self.style.thickness);
            marks.paste(&frame, rect.x, rect.y);
        };
        if let Some(anchor) = self.anchor {
            outline(anchor, self.style.anchor);
        }
        outline(self.selected, self.style.selected);
        let composed = ops::merge_over(&marks, &picture)?;
        self.sprite.set_surface(composed, Fit::Exact)
    }

    fn neighbour(&self, code: KeyCode) -> Option<TileCoord> {
        let TileCoord { x, y } = self.selected;
        let tiles = self.grid.dimensions();
        let next = match code {
            KeyCode::Left => TileCoord::new(x.saturating_sub(1), y),
            KeyCode::Right => TileCoord::new((x + 1).min(tiles.width.saturating_sub(1)), y),
            KeyCode::Up => TileCoord::new(x, y.saturating_sub(1)),
            KeyCode::Down => TileCoord::new(x, (y + 1).min(tiles.height.saturating_sub(1))),
            _ => return None,
        };
        (next != self.selected).then_some(next)
    }
}

impl Component<Msg> for ScrambledImage {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    fn on_click(&mut self, event: &MouseEvent) -> Cmd<Msg> {
        match self.tile_at(event.position()) {
            Some(coord) => Cmd::msg(Msg::Select(coord)),
            None => Cmd::none(),
        }
    }

    fn on_key_press(&mut self, key: &KeyEvent) -> Cmd<Msg> {
        match self.neighbour(key.code) {
            Some(coord) => Cmd::msg(Msg::Select(coord)),
            None => Cmd::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_core::event::Event;
    use mosaic_render::Rgba;
    use mosaic_runtime::component::dispatch_events;

    const STYLE: OutlineStyle = OutlineStyle {
        thickness: 1,
        selected: Rgba::rgb(255, 0, 0),
        anchor: Rgba::rgb(0, 0, 255),
    };

    fn image() -> ScrambledImage {
        let picture = PixelImage::filled(8, 8, Rgba::rgb(10, 10, 10));
        let grid = TileGrid::from_image(&picture, 4).unwrap();
        ScrambledImage::new(grid, STYLE).unwrap()
    }

    #[test]
    fn selected_tile_is_outlined() {
        let img = image();
        let surface = img.sprite().surface();
        assert_eq!(surface.get(0, 0), Some(STYLE.selected));
        assert_eq!(surface.get(3, 3), Some(STYLE.selected));
        assert_eq!(surface.get(1, 1), Some(Rgba::rgb(10, 10, 10)));
        assert_eq!(surface.get(5, 5), Some(Rgba::rgb(10, 10, 10)));
    }

    #[test]
    fn anchor_is_outlined_under_selection() {
        let mut img = image();
        img.set_anchor(Some(TileCoord::new(1, 1)));
        img.render().unwrap();
        assert_eq!(img.sprite().surface().get(4, 4), Some(STYLE.anchor));
        assert_eq!(img.sprite().surface().get(0, 0), Some(STYLE.selected));
    }

    #[test]
    fn fit_scales_tile_rects() {
        let mut img = image();
        img.fit(Rect::new(10, 10, 20, 20)).unwrap();
        assert_eq!(img.tile_rect(TileCoord::new(1, 0)), Rect::new(10, 0, 10, 10));
        assert_eq!(img.tile_at(Point::new(25, 12)), Some(TileCoord::new(1, 0)));
        assert_eq!(img.tile_at(Point::new(29, 29)), Some(TileCoord::new(1, 1)));
        assert_eq!(img.tile_at(Point::new(5, 5)), None);
    }

    #[test]
    fn click_requests_selection() {
        let mut img = image();
        let cmd = dispatch_events(&mut img, &[Event::mouse_down(6, 1), Event::mouse_up(6, 1)]);
        assert!(matches!(cmd, Cmd::Msg(Msg::Select(c)) if c == TileCoord::new(1, 0)));
    }

    #[test]
    fn arrows_stay_inside_grid() {
        let mut img = image();
        assert!(dispatch_events(&mut img, &[Event::key(KeyCode::Left)]).is_none());
        let cmd = dispatch_events(&mut img, &[Event::key(KeyCode::Down)]);
        assert!(matches!(cmd, Cmd::Msg(Msg::Select(c)) if c == TileCoord::new(0, 1)));

        assert!(img.select(TileCoord::new(1, 1)));
        assert!(dispatch_events(&mut img, &[Event::key(KeyCode::Right)]).is_none());
        assert!(!img.select(TileCoord::new(2, 0)));
    }

    #[test]
    fn set_grid_clears_anchor() {
        let mut img = image();
        img.select(TileCoord::new(1, 1));
        img.set_anchor(Some(TileCoord::new(0, 0)));
        let grid = img.grid().clone();
        img.set_grid(grid).unwrap();
        assert_eq!(img.anchor(), None);
        assert_eq!(img.selected(), TileCoord::new(1, 1));
    }
}
