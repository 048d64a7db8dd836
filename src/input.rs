use std::thread;

use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::commands::{KEY_ENTER, KEY_ESC};
use crate::msg::{AppOp, Message};

/// Forwards terminal key presses to the main loop until it hangs up.
pub fn spawn(main: Sender<Message>) {
    thread::spawn(move || loop {
        let msg = match event::read() {
            Ok(Event::Key(key)) => translate_key(&key),
            Ok(Event::Resize(..)) => Some(Message::new_scalar(AppOp::Redraw, 0)),
            Ok(_) => None,
            Err(e) => {
                log::error!("terminal input failed: {}", e);
                Some(Message::new_scalar(AppOp::Quit, 0))
            }
        };
        if let Some(msg) = msg {
            if main.send(msg).is_err() {
                break;
            }
        }
    });
}

fn translate_key(key: &KeyEvent) -> Option<Message> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    // raw mode swallows SIGINT
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(Message::new_scalar(AppOp::Quit, 0)),
            _ => None,
        };
    }
    let ch = match key.code {
        KeyCode::Char(c) => c,
        KeyCode::Enter => KEY_ENTER,
        KeyCode::Esc => KEY_ESC,
        _ => return None,
    };
    Some(Message::new_scalar(AppOp::Rawkeys, ch as usize))
}
