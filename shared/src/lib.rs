//! Domain types shared by the site frontend and backend.
//!
//! Everything in here is target independent: the browser controllers in
//! `frontend` drive these state machines and only translate their output
//! into DOM writes.

pub mod config;
pub mod locale;
pub mod overlay;
pub mod submission;
pub mod theme;

pub use config::{ConfigError, FormConfig, GeneratorConfig, ImagesConfig, LanguagesConfig, SiteConfig};
pub use locale::{Locale, LocaleError, StatusText, negotiate_language, redirect_location};
pub use overlay::{IMAGE_ERROR_MESSAGE, LargeImage, Overlay, OverlayEvent, OverlayState, OverlayUpdate, OverlayView};
pub use submission::{Submission, SubmissionEffect, SubmissionEvent, SubmissionState};
pub use theme::{MOON_ICON_SVG, SUN_ICON_SVG, THEME_ATTRIBUTE, Theme, ThemeEvent, ThemeSwitcher};
