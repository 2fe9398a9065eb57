//! Light/dark theme switching.
//!
//! Started as soon as the module runs, ahead of the window `load` event, so
//! the OS preference replaces the server-rendered marker as early as the
//! wasm bundle allows.

use crate::dataflow::{Actor, relay};
use crate::dom;
use futures::channel::mpsc::UnboundedReceiver;
use futures::{StreamExt, stream};
use shared::{THEME_ATTRIBUTE, Theme, ThemeEvent, ThemeSwitcher};
use web_sys::{Element, Event, MediaQueryList, MediaQueryListEvent};
use zoon::*;

pub const TOGGLE_ID: &str = "theme-toggle";
pub const TOGGLE_ICON_ID: &str = "theme-toggle-icon";
const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// Owned by the page for its whole lifetime.
pub struct ThemeToggle {
    #[allow(dead_code)]
    theme: Actor<ThemeSwitcher>,
    #[allow(dead_code)]
    render_task: TaskHandle,
}

struct ThemeTargets {
    root: Element,
    icon: Element,
}

impl ThemeTargets {
    fn apply(&self, theme: Theme) {
        if let Err(error) = self.root.set_attribute(THEME_ATTRIBUTE, theme.marker()) {
            zoon::eprintln!("🚨 Failed to set theme marker: {}", dom::DomError::from(error));
        }
        self.icon.set_inner_html(theme.icon_svg());
    }
}

impl ThemeToggle {
    /// Returns `None` when the toggle or its icon is missing from the page.
    pub fn start() -> Option<Self> {
        let Some((toggle, icon)) = dom::element_by_id::<Element>(TOGGLE_ID).zip(dom::element_by_id::<Element>(TOGGLE_ICON_ID)) else {
            zoon::println!("🎨 No theme toggle on this page, theme switching disabled");
            return None;
        };
        let root = dom::document()?.document_element()?;
        let targets = ThemeTargets { root, icon };

        let media_query = dark_scheme_query();
        let initial = Theme::preferred(media_query.as_ref().is_some_and(MediaQueryList::matches));
        targets.apply(initial);

        let (toggle_clicked_relay, toggle_clicked_stream) = relay::<()>();
        let (preference_changed_relay, preference_changed_stream) = relay::<bool>();

        if let Err(error) = dom::on(&toggle, "click", move |_: Event| toggle_clicked_relay.send(())) {
            zoon::eprintln!("🚨 Theme toggle click not wired: {error}");
        }
        if let Some(media_query) = &media_query {
            let wired = dom::on(media_query, "change", move |event: MediaQueryListEvent| {
                preference_changed_relay.send(event.matches());
            });
            if let Err(error) = wired {
                zoon::eprintln!("🚨 Color scheme changes not observed: {error}");
            }
        }

        let theme = Actor::new(ThemeSwitcher::new(initial), move |state| {
            process_theme_events(state, toggle_clicked_stream, preference_changed_stream)
        });

        let render_task = Task::start_droppable(
            theme
                .signal()
                .map(|switcher| switcher.current())
                .dedupe()
                .for_each(move |theme| {
                    targets.apply(theme);
                    async {}
                }),
        );

        zoon::println!("🎨 Theme controller started with {} theme", initial.marker());
        Some(Self { theme, render_task })
    }
}

/// Applies toggle clicks and preference changes in arrival order. Either
/// relay may close early, for example when the media query is unavailable;
/// the loop ends only once both have.
async fn process_theme_events(
    state: Mutable<ThemeSwitcher>,
    toggle_clicked_stream: UnboundedReceiver<()>,
    preference_changed_stream: UnboundedReceiver<bool>,
) {
    let mut events = stream::select(
        toggle_clicked_stream.map(|()| ThemeEvent::ToggleClicked),
        preference_changed_stream.map(|matches_dark| ThemeEvent::PreferenceChanged { matches_dark }),
    );
    while let Some(event) = events.next().await {
        state.lock_mut().handle(event);
    }
}

fn dark_scheme_query() -> Option<MediaQueryList> {
    let window = web_sys::window()?;
    match window.match_media(DARK_SCHEME_QUERY) {
        Ok(query) => query,
        Err(error) => {
            zoon::eprintln!("🚨 Color scheme query failed: {}", dom::DomError::from(error));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_toggle_keeps_working_without_preference_relay() {
        let (toggle_clicked_relay, toggle_clicked_stream) = relay::<()>();
        let (preference_changed_relay, preference_changed_stream) = relay::<bool>();
        // no media query support: the change listener never got the relay
        drop(preference_changed_relay);

        for _ in 0..3 {
            toggle_clicked_relay.send(());
        }
        drop(toggle_clicked_relay);

        let state = Mutable::new(ThemeSwitcher::new(Theme::Light));
        process_theme_events(state.clone(), toggle_clicked_stream, preference_changed_stream).await;
        assert_eq!(state.get().current(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_preference_keeps_working_without_toggle_relay() {
        let (toggle_clicked_relay, toggle_clicked_stream) = relay::<()>();
        let (preference_changed_relay, preference_changed_stream) = relay::<bool>();
        drop(toggle_clicked_relay);

        for matches_dark in [true, false, true] {
            preference_changed_relay.send(matches_dark);
        }
        drop(preference_changed_relay);

        let state = Mutable::new(ThemeSwitcher::new(Theme::Light));
        process_theme_events(state.clone(), toggle_clicked_stream, preference_changed_stream).await;
        assert_eq!(state.get().current(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_events_interleave_in_arrival_order() {
        let (toggle_clicked_relay, toggle_clicked_stream) = relay::<()>();
        let (preference_changed_relay, preference_changed_stream) = relay::<bool>();

        // OS goes dark, then the user toggles back to light
        preference_changed_relay.send(true);
        let state = Mutable::new(ThemeSwitcher::new(Theme::Light));
        let processing = process_theme_events(state.clone(), toggle_clicked_stream, preference_changed_stream);
        let sending = async move {
            tokio::task::yield_now().await;
            toggle_clicked_relay.send(());
            drop(toggle_clicked_relay);
            drop(preference_changed_relay);
        };
        futures::join!(processing, sending);

        assert_eq!(state.get().current(), Theme::Light);
    }
}
