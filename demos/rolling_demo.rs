//! Rolling Demo: A notice ticker in the terminal.
//!
//! Demonstrates:
//! - Class and layout cell recipes sharing one view
//! - Frame pacing with `FramePacer` and crossbeam `select!`
//! - Pause/resume, reload, tap delegate
//! - Stopping from another thread through a `StopHandle`
//!
//! Logs go to `rolling_demo.log`; set `RUST_LOG=flywheel_notice=trace` for detail.

use crossbeam_channel::{select, unbounded};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use flywheel_notice::{
    CellPool, DataSource, FramePacer, NoticeCell, NoticeDelegate, NoticeStatus, NoticeView, Prefab,
    Rect,
};
use std::any::Any;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthChar;

const ORIGIN: (u16, u16) = (4, 3);

#[derive(Debug, Default)]
struct Notice {
    text: String,
    color: Option<Color>,
}

struct Board {
    items: Vec<(bool, &'static str)>,
}

impl DataSource<Notice> for Board {
    fn row_count(&self) -> usize {
        self.items.len()
    }

    fn cell_for(&self, pool: &mut CellPool<Notice>, index: usize) -> Option<NoticeCell<Notice>> {
        let (urgent, text) = self.items[index];
        let mut cell = pool.dequeue(if urgent { "alert" } else { "plain" })?;
        cell.content.text = format!("{}. {text}", index + 1);
        Some(cell)
    }
}

#[derive(Default)]
struct LastTap(RefCell<Option<usize>>);

impl NoticeDelegate for LastTap {
    fn on_tap(&self, index: usize) {
        self.0.replace(Some(index));
    }
}

fn main() -> io::Result<()> {
    let log = std::fs::File::create("rolling_demo.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(log))
        .with_ansi(false)
        .init();

    let board = Rc::new(Board {
        items: vec![
            (false, "Scheduled maintenance tonight at 02:00 UTC"),
            (true, "Build farm degraded, queue times above 20 minutes"),
            (false, "New release notes are up on the wiki"),
            (false, "Office closed on Friday"),
        ],
    });
    let taps = Rc::new(LastTap::default());

    let (width, _) = terminal::size()?;
    let mut view = NoticeView::new(Rect::from_size(width.saturating_sub(ORIGIN.0 * 2), 3));
    view.register_class("plain", Notice::default);
    view.register_layout("alert", || {
        vec![Box::new(Prefab::new(
            "alert",
            Notice {
                text: String::new(),
                color: Some(Color::Red),
            },
        )) as Box<dyn Any>]
    });
    view.set_data_source(&board);
    view.set_delegate(&taps);

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let pacer = FramePacer::spawn(Duration::from_millis(16)).map_err(io::Error::other)?;
    let (key_tx, key_rx) = unbounded();
    std::thread::spawn(move || {
        while let Ok(Event::Key(key)) = event::read() {
            if key.kind == KeyEventKind::Press && key_tx.send(key.code).is_err() {
                break;
            }
        }
    });

    view.reload_and_start();
    let mut running = true;
    while running {
        select! {
            recv(pacer.receiver()) -> frame => {
                if let Ok(frame) = frame {
                    view.on_frame(frame.at);
                }
            }
            recv(key_rx) -> key => match key {
                Ok(KeyCode::Esc | KeyCode::Char('q')) | Err(_) => running = false,
                Ok(KeyCode::Char(' ')) => match view.status() {
                    NoticeStatus::Working => view.pause(),
                    NoticeStatus::Paused => view.resume(),
                    NoticeStatus::Idle => {}
                },
                Ok(KeyCode::Char('r')) => view.reload_and_start(),
                Ok(KeyCode::Char('s')) => {
                    let handle = view.stop_handle();
                    std::thread::spawn(move || handle.stop());
                }
                Ok(KeyCode::Enter) => view.tap(),
                Ok(_) => {}
            },
        }

        if view.needs_redraw() {
            draw(&mut stdout, &view, &taps)?;
            view.clear_redraw();
        }
    }

    pacer.join();
    execute!(stdout, cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()
}

fn draw(out: &mut impl Write, view: &NoticeView<Notice>, taps: &LastTap) -> io::Result<()> {
    let viewport = view.viewport();
    let (ox, oy) = ORIGIN;

    queue!(out, Clear(ClearType::All), cursor::MoveTo(ox, oy - 2))?;
    queue!(
        out,
        Print(format!(
            "status: {:?}  index: {}  last tap: {:?}   [space] pause  [r] reload  [s] stop  [enter] tap  [q] quit",
            view.status(),
            view.current_index(),
            taps.0.borrow()
        ))
    )?;

    for cell in view.visible_cells() {
        let Some(visible) = cell.frame().intersection(&viewport) else {
            continue;
        };
        // Text sits on the middle row of the cell
        let text_row = cell.frame().y + i32::from(cell.frame().height / 2);
        if text_row < visible.y || text_row >= visible.bottom() {
            continue;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let row = oy + text_row as u16;
        queue!(out, cursor::MoveTo(ox, row))?;
        if let Some(color) = cell.content.color {
            queue!(out, SetForegroundColor(color))?;
        }
        queue!(out, Print(truncate(&cell.content.text, viewport.width)), ResetColor)?;
    }
    out.flush()
}

fn truncate(text: &str, max_width: u16) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= usize::from(max_width)
        })
        .collect()
}
