use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo};
use crossterm::queue;
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use stopwatch_core::{RunState, Snapshot};

use crate::theme::{Palette, Theme};

const TITLE_ROW: u16 = 1;
const TIME_ROW: u16 = 3;
const CONTROLS_ROW: u16 = 5;
const LAPS_ROW: u16 = 7;
const LEFT: u16 = 2;

pub fn clear_screen<W: Write>(out: &mut W, palette: &Palette) -> io::Result<()> {
    queue!(
        out,
        SetBackgroundColor(palette.bg),
        SetForegroundColor(palette.fg),
        Clear(ClearType::All),
        Hide
    )
}

/// Controls the current state can act on, in display order.
pub fn controls(state: RunState) -> [(&'static str, bool); 7] {
    let running = state == RunState::Running;
    [
        ("space=start", !running),
        ("space=stop", running),
        ("r=reset", true),
        ("l=lap", running),
        ("c=clear laps", true),
        ("t=theme", true),
        ("q=quit", true),
    ]
}

pub fn draw_stopwatch<W: Write>(
    out: &mut W,
    snap: &Snapshot<'_>,
    theme: Theme,
    screen_rows: u16,
) -> io::Result<()> {
    let palette = theme.palette();
    clear_screen(out, &palette)?;

    // Header
    queue!(
        out,
        MoveTo(LEFT, TITLE_ROW),
        SetAttribute(Attribute::Bold),
        Print("STOPWATCH"),
        SetAttribute(Attribute::NormalIntensity)
    )?;

    // Time display
    let time_color = match snap.state {
        RunState::Running => palette.running,
        RunState::Stopped => palette.fg,
    };
    queue!(
        out,
        MoveTo(LEFT, TIME_ROW),
        SetForegroundColor(time_color),
        SetAttribute(Attribute::Bold),
        Print(snap.elapsed),
        SetAttribute(Attribute::NormalIntensity),
        SetForegroundColor(palette.fg)
    )?;

    // Controls, unavailable ones dimmed
    queue!(out, MoveTo(LEFT, CONTROLS_ROW))?;
    for (label, enabled) in controls(snap.state) {
        let color = if enabled { palette.fg } else { palette.dim };
        queue!(out, SetForegroundColor(color), Print(label), Print("  "))?;
    }
    queue!(out, SetForegroundColor(palette.fg))?;

    // Lap list (most recent first), hidden while empty
    if !snap.laps.is_empty() {
        queue!(
            out,
            MoveTo(LEFT, LAPS_ROW),
            SetAttribute(Attribute::Bold),
            Print("LAPS"),
            SetAttribute(Attribute::NormalIntensity)
        )?;
        let list_top = LAPS_ROW + 1;
        let max_visible = screen_rows.saturating_sub(list_top + 1) as usize;
        for (i, lap) in snap.laps.iter().take(max_visible).enumerate() {
            queue!(
                out,
                MoveTo(LEFT, list_top + i as u16),
                Print(format!("Lap {:<4} {}", lap.number, lap.snapshot))
            )?;
        }
    }

    queue!(out, ResetColor)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stopwatch_core::Stopwatch;

    fn render(sw: &Stopwatch, rows: u16) -> String {
        let mut buf = Vec::new();
        draw_stopwatch(&mut buf, &sw.snapshot(), Theme::Light, rows).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_draw_idle() {
        let sw = Stopwatch::new();
        let screen = render(&sw, 24);
        assert!(screen.contains("STOPWATCH"));
        assert!(screen.contains("00:00:00.000"));
        assert!(!screen.contains("LAPS"));
    }

    #[test]
    fn test_draw_laps_most_recent_first() {
        let mut sw = Stopwatch::new();
        sw.start();
        sw.tick(1500);
        sw.record_lap();
        sw.tick(1000);
        sw.record_lap();

        let screen = render(&sw, 24);
        assert!(screen.contains("00:00:02.500"));
        let lap2 = screen.find("Lap 2").unwrap();
        let lap1 = screen.find("Lap 1").unwrap();
        assert!(lap2 < lap1);
        assert!(screen.contains("00:00:01.500"));
    }

    #[test]
    fn test_draw_truncates_laps() {
        let mut sw = Stopwatch::new();
        sw.start();
        for _ in 0..30 {
            sw.record_lap();
        }
        // rows 8..=10 are free on a 12 row screen
        let screen = render(&sw, 12);
        assert!(screen.contains("Lap 30"));
        assert!(screen.contains("Lap 28"));
        assert!(!screen.contains("Lap 27"));
    }

    #[test]
    fn test_controls_follow_state() {
        let stopped = controls(RunState::Stopped);
        assert!(stopped.contains(&("space=start", true)));
        assert!(stopped.contains(&("l=lap", false)));

        let running = controls(RunState::Running);
        assert!(running.contains(&("space=start", false)));
        assert!(running.contains(&("space=stop", true)));
        assert!(running.contains(&("l=lap", true)));
    }
}
