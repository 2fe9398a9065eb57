//! Portfolio page entry point
//!
//! Attaches the page controllers to the server-rendered markup. The theme is
//! applied right away, everything else waits for the window `load` event.
//! Each controller owns its own elements and state.

use shared::SiteConfig;
use std::sync::OnceLock;
use zoon::*;

mod contact_form;
mod dataflow;
mod dom;
mod image_overlay;
mod project_images;
mod theme_toggle;

use contact_form::ContactForm;
use image_overlay::ImageOverlay;
use theme_toggle::ThemeToggle;

/// Stores the startup task handle to prevent it from being dropped.
static MAIN_TASK: OnceLock<TaskHandle> = OnceLock::new();

/// Controllers live as long as the page.
static PAGE: OnceLock<PageControllers> = OnceLock::new();

const SITE_CONFIG: &str = include_str!("../../site.toml");

#[allow(dead_code)]
struct PageControllers {
    theme: Option<ThemeToggle>,
    overlay: ImageOverlay,
    contact: Option<ContactForm>,
}

impl PageControllers {
    fn start(theme: Option<ThemeToggle>, config: SiteConfig) -> Self {
        let overlay = ImageOverlay::start(config.images.preload_delay_ms);
        project_images::start(config.images.lazy_load_delay_ms);
        let contact = ContactForm::start(config.form.endpoint);
        Self { theme, overlay, contact }
    }
}

fn site_config() -> SiteConfig {
    SiteConfig::from_toml_str(SITE_CONFIG).unwrap_or_else(|error| {
        zoon::eprintln!("🚨 {error}, using defaults");
        SiteConfig::default()
    })
}

pub fn main() {
    // Module scripts run after parsing, so the toggle markup already exists
    let theme = ThemeToggle::start();

    let handle = Task::start_droppable(async move {
        dom::window_loaded().await;

        let controllers = PageControllers::start(theme, site_config());
        if PAGE.set(controllers).is_err() {
            zoon::eprintln!("⚠️ Page controllers already initialized - ignoring duplicate initialization");
        }
    });
    let _ = MAIN_TASK.set(handle);
}
