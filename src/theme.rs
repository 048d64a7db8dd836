use crossterm::style::Color;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub running: Color,
    pub dim: Color,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Unknown values fall back to the default theme.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                fg: Color::Black,
                bg: Color::White,
                running: Color::DarkGreen,
                dim: Color::Grey,
            },
            Theme::Dark => Palette {
                fg: Color::White,
                bg: Color::Black,
                running: Color::Green,
                dim: Color::DarkGrey,
            },
        }
    }
}
