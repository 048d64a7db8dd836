//! Key to command dispatch.

pub const KEY_ENTER: char = '\r';
pub const KEY_ESC: char = '\u{001b}';

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    ToggleRun,
    Reset,
    Lap,
    ClearLaps,
    ToggleTheme,
    Quit,
}

impl Command {
    pub fn from_key(key: char) -> Option<Command> {
        match key.to_ascii_lowercase() {
            ' ' | KEY_ENTER | '\n' => Some(Command::ToggleRun),
            'r' => Some(Command::Reset),
            'l' => Some(Command::Lap),
            'c' => Some(Command::ClearLaps),
            't' => Some(Command::ToggleTheme),
            'q' | KEY_ESC => Some(Command::Quit),
            _ => None,
        }
    }
}
