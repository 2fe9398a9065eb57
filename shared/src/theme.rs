/// Attribute on `<html>` that carries the active theme.
pub const THEME_ATTRIBUTE: &str = "data-bs-theme";

/// Shown while the dark theme is active.
pub const SUN_ICON_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" fill="currentColor" class="bi bi-sun-fill" viewBox="0 0 16 16"><path d="M8 12a4 4 0 1 0 0-8 4 4 0 0 0 0 8M8 0a.5.5 0 0 1 .5.5v2a.5.5 0 0 1-1 0v-2A.5.5 0 0 1 8 0m0 13a.5.5 0 0 1 .5.5v2a.5.5 0 0 1-1 0v-2A.5.5 0 0 1 8 13m8-5a.5.5 0 0 1-.5.5h-2a.5.5 0 0 1 0-1h2a.5.5 0 0 1 .5.5M3 8a.5.5 0 0 1-.5.5h-2a.5.5 0 0 1 0-1h2A.5.5 0 0 1 3 8m10.657-5.657a.5.5 0 0 1 0 .707l-1.414 1.415a.5.5 0 1 1-.707-.708l1.414-1.414a.5.5 0 0 1 .707 0m-9.193 9.193a.5.5 0 0 1 0 .707L3.05 13.657a.5.5 0 0 1-.707-.707l1.414-1.414a.5.5 0 0 1 .707 0m9.193 2.121a.5.5 0 0 1-.707 0l-1.414-1.414a.5.5 0 0 1 .707-.707l1.414 1.414a.5.5 0 0 1 0 .707M4.464 4.465a.5.5 0 0 1-.707 0L2.343 3.05a.5.5 0 1 1 .707-.707l1.414 1.414a.5.5 0 0 1 0 .708"/></svg>"#;

/// Shown while the light theme is active.
pub const MOON_ICON_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" fill="currentColor" class="bi bi-moon-stars-fill" viewBox="0 0 16 16"><path d="M6 .278a.77.77 0 0 1 .08.858 7.2 7.2 0 0 0-.878 3.46c0 4.021 3.278 7.277 7.318 7.277q.792-.001 1.533-.16a.79.79 0 0 1 .81.316.73.73 0 0 1-.031.893A8.35 8.35 0 0 1 8.344 16C3.734 16 0 12.286 0 7.71 0 4.266 2.114 1.312 5.124.06A.75.75 0 0 1 6 .278"/><path d="M10.794 3.148a.217.217 0 0 1 .412 0l.387 1.162c.173.518.579.924 1.097 1.097l1.162.387a.217.217 0 0 1 0 .412l-1.162.387a1.73 1.73 0 0 0-1.097 1.097l-.387 1.162a.217.217 0 0 1-.412 0l-.387-1.162A1.73 1.73 0 0 0 9.31 6.593l-1.162-.387a.217.217 0 0 1 0-.412l1.162-.387a1.73 1.73 0 0 0 1.097-1.097z"/></svg>"#;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Maps the `(prefers-color-scheme: dark)` media query result to a theme.
    pub fn preferred(matches_dark: bool) -> Self {
        if matches_dark { Theme::Dark } else { Theme::Light }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Value written to [`THEME_ATTRIBUTE`].
    pub fn marker(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The toggle always advertises the other mode.
    pub fn icon_svg(self) -> &'static str {
        match self {
            Theme::Dark => SUN_ICON_SVG,
            Theme::Light => MOON_ICON_SVG,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeEvent {
    ToggleClicked,
    PreferenceChanged { matches_dark: bool },
}

/// Last-writer-wins theme state: a toggle inverts, an OS change overrides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeSwitcher {
    current: Theme,
}

impl ThemeSwitcher {
    pub fn new(initial: Theme) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Returns the theme to apply after `event`.
    pub fn handle(&mut self, event: ThemeEvent) -> Theme {
        self.current = match event {
            ThemeEvent::ToggleClicked => self.current.toggled(),
            ThemeEvent::PreferenceChanged { matches_dark } => Theme::preferred(matches_dark),
        };
        self.current
    }
}
