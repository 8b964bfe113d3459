#![forbid(unsafe_code)]

//! Crossterm host.
//!
//! Each terminal cell shows two pixels stacked vertically: the upper half
//! block glyph takes the top pixel as foreground and the bottom pixel as
//! background. The frame is therefore `columns × 2·rows` pixels.

use std::io::{self, BufWriter, Stdout, Write};
use std::sync::OnceLock;
use std::time::Duration;

use crossterm::event::{self as cte, KeyEventKind, KeyModifiers, MouseButton};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};
use mosaic_core::event::{Event, KeyCode, KeyEvent, Modifiers};
use mosaic_core::geometry::Size;
use mosaic_render::Rgba;
use mosaic_render::dirty::DirtyRegion;
use mosaic_render::frame::FrameBuffer;
use mosaic_runtime::backend::{EventSource, Presenter};
use tracing::info;

const HALF_BLOCK: char = '▀';

/// Raw-mode, alternate-screen terminal with mouse capture.
///
/// Everything is restored on drop, and on panic.
#[derive(Debug)]
pub struct TerminalHost {
    out: BufWriter<Stdout>,
}

impl TerminalHost {
    pub fn new() -> io::Result<Self> {
        install_panic_hook();
        terminal::enable_raw_mode()?;
        let mut out = BufWriter::new(io::stdout());
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cte::EnableMouseCapture,
            cursor::Hide
        )?;
        info!("terminal host started");
        Ok(Self { out })
    }
}

impl Drop for TerminalHost {
    fn drop(&mut self) {
        restore_terminal(&mut self.out);
        info!("terminal host stopped");
    }
}

impl EventSource for TerminalHost {
    fn size(&self) -> io::Result<Size> {
        let (columns, rows) = terminal::size()?;
        Ok(Size::new(columns as u32, rows as u32 * 2))
    }

    fn drain_events(&mut self, out: &mut Vec<Event>) -> io::Result<()> {
        while cte::poll(Duration::ZERO)? {
            if let Some(event) = map_event(cte::read()?) {
                out.push(event);
            }
        }
        Ok(())
    }
}

impl Presenter for TerminalHost {
    fn present(&mut self, frame: &FrameBuffer, dirty: &DirtyRegion) -> io::Result<()> {
        let mut colors: Option<(Rgba, Rgba)> = None;
        for rect in dirty.iter() {
            let first_row = rect.y / 2;
            let last_row = rect.bottom().div_ceil(2);
            for row in first_row..last_row {
                queue!(self.out, cursor::MoveTo(cell(rect.x), cell(row)))?;
                for x in rect.x..rect.right() {
                    let pair = cell_colors(frame, x, row);
                    if colors != Some(pair) {
                        queue!(
                            self.out,
                            SetForegroundColor(to_color(pair.0)),
                            SetBackgroundColor(to_color(pair.1))
                        )?;
                        colors = Some(pair);
                    }
                    queue!(self.out, Print(HALF_BLOCK))?;
                }
            }
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}

fn cell(v: u32) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

/// Top and bottom pixel of a terminal cell. Rows past the frame show the
/// background.
pub fn cell_colors(frame: &FrameBuffer, x: u32, row: u32) -> (Rgba, Rgba) {
    let bg = frame.background();
    let top = frame.pixel(x, row * 2).unwrap_or(bg);
    let bottom = frame.pixel(x, row * 2 + 1).unwrap_or(bg);
    (top, bottom)
}

fn to_color(c: Rgba) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Translate a crossterm event. Ctrl+C becomes [`Event::Quit`]; pointer rows
/// are doubled into pixel rows.
pub fn map_event(event: cte::Event) -> Option<Event> {
    match event {
        cte::Event::Key(key) => map_key(key),
        cte::Event::Mouse(mouse) => {
            let x = mouse.column as u32;
            let y = mouse.row as u32 * 2;
            match mouse.kind {
                cte::MouseEventKind::Down(MouseButton::Left) => Some(Event::mouse_down(x, y)),
                cte::MouseEventKind::Up(MouseButton::Left) => Some(Event::mouse_up(x, y)),
                cte::MouseEventKind::Moved | cte::MouseEventKind::Drag(MouseButton::Left) => {
                    Some(Event::mouse_move(x, y))
                }
                _ => None,
            }
        }
        cte::Event::Resize(columns, rows) => Some(Event::Resize {
            width: columns as u32,
            height: rows as u32 * 2,
        }),
        _ => None,
    }
}

fn map_key(key: cte::KeyEvent) -> Option<Event> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let modifiers = map_modifiers(key.modifiers);
    let code = match key.code {
        cte::KeyCode::Char('c') if modifiers.contains(Modifiers::CTRL) => return Some(Event::Quit),
        cte::KeyCode::Char(c) => KeyCode::Char(c),
        cte::KeyCode::Enter => KeyCode::Enter,
        cte::KeyCode::Esc => KeyCode::Escape,
        cte::KeyCode::Backspace => KeyCode::Backspace,
        cte::KeyCode::Tab => KeyCode::Tab,
        cte::KeyCode::Up => KeyCode::Up,
        cte::KeyCode::Down => KeyCode::Down,
        cte::KeyCode::Left => KeyCode::Left,
        cte::KeyCode::Right => KeyCode::Right,
        cte::KeyCode::F(n) => KeyCode::F(n),
        _ => return None,
    };
    Some(Event::Key(KeyEvent::new(code).with_modifiers(modifiers)))
}

fn map_modifiers(modifiers: KeyModifiers) -> Modifiers {
    let mut mapped = Modifiers::NONE;
    if modifiers.contains(KeyModifiers::SHIFT) {
        mapped |= Modifiers::SHIFT;
    }
    if modifiers.contains(KeyModifiers::ALT) {
        mapped |= Modifiers::ALT;
    }
    if modifiers.contains(KeyModifiers::CONTROL) {
        mapped |= Modifiers::CTRL;
    }
    if modifiers.contains(KeyModifiers::SUPER) || modifiers.contains(KeyModifiers::META) {
        mapped |= Modifiers::SUPER;
    }
    mapped
}

fn restore_terminal(out: &mut impl Write) {
    let _ = execute!(
        out,
        ResetColor,
        cte::DisableMouseCapture,
        cursor::Show,
        terminal::LeaveAlternateScreen
    );
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal(&mut io::stdout());
            previous(info);
        }));
    });
}
