use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::data_io::builtin_portfolio;
use crate::model::Portfolio;
use crate::model::config::Config;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Fixed "today" so day counts are stable
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 16).unwrap()
}

/// App over the built-in data set
pub fn seed_app() -> App {
    App::new(builtin_portfolio().unwrap(), &Config::default(), test_today())
}

/// App with no projects at all
pub fn empty_app() -> App {
    App::new(Portfolio::default(), &Config::default(), test_today())
}
