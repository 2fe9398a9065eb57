//! Lightbox state for the profile picture.
//!
//! The overlay tracks two independent facts: whether it is open, and what
//! happened to the deferred high-resolution image. The visible state is
//! derived from both, so a preload finishing while the overlay is closed is
//! recorded but stays invisible until the next open.

/// Replaces the overlay content once the large image fails to load.
pub const IMAGE_ERROR_MESSAGE: &str = "Could not load image.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LargeImage {
    #[default]
    Pending,
    Loaded,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayState {
    Closed,
    OpenLoading,
    OpenLoaded,
    OpenErrored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayEvent {
    ThumbnailClicked,
    BackdropClicked,
    LargeImageClicked,
    EscapePressed,
    LargeImageLoaded,
    LargeImageFailed,
}

/// Element visibility for one state. At most one of `spinner`, `image` and
/// `error` is set, and none of them while `overlay` is hidden.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayView {
    pub overlay: bool,
    pub spinner: bool,
    pub image: bool,
    pub error: bool,
}

impl OverlayView {
    pub fn for_state(state: OverlayState) -> Self {
        let hidden = Self { overlay: false, spinner: false, image: false, error: false };
        match state {
            OverlayState::Closed => hidden,
            OverlayState::OpenLoading => Self { overlay: true, spinner: true, ..hidden },
            OverlayState::OpenLoaded => Self { overlay: true, image: true, ..hidden },
            OverlayState::OpenErrored => Self { overlay: true, error: true, ..hidden },
        }
    }
}

/// What the DOM layer has to do after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayUpdate {
    pub view: OverlayView,
    /// Set exactly once per page life, on the first load failure.
    pub replace_content_with_error: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Overlay {
    open: bool,
    large_image: LargeImage,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn large_image(&self) -> LargeImage {
        self.large_image
    }

    pub fn state(&self) -> OverlayState {
        match (self.open, self.large_image) {
            (false, _) => OverlayState::Closed,
            (true, LargeImage::Pending) => OverlayState::OpenLoading,
            (true, LargeImage::Loaded) => OverlayState::OpenLoaded,
            (true, LargeImage::Failed) => OverlayState::OpenErrored,
        }
    }

    pub fn view(&self) -> OverlayView {
        OverlayView::for_state(self.state())
    }

    /// Applies `event`, returning `None` when nothing observable changed.
    pub fn handle(&mut self, event: OverlayEvent) -> Option<OverlayUpdate> {
        let before = *self;
        let mut replace_content_with_error = false;

        match event {
            OverlayEvent::ThumbnailClicked => self.open = true,
            OverlayEvent::BackdropClicked | OverlayEvent::LargeImageClicked | OverlayEvent::EscapePressed => {
                self.open = false;
            }
            OverlayEvent::LargeImageLoaded => {
                // a failure is final, a late load event must not revive the image
                if self.large_image == LargeImage::Pending {
                    self.large_image = LargeImage::Loaded;
                }
            }
            OverlayEvent::LargeImageFailed => {
                if self.large_image != LargeImage::Failed {
                    self.large_image = LargeImage::Failed;
                    replace_content_with_error = true;
                }
            }
        }

        if *self == before {
            return None;
        }
        Some(OverlayUpdate { view: self.view(), replace_content_with_error })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_view(overlay: &mut Overlay) -> OverlayView {
        overlay.handle(OverlayEvent::ThumbnailClicked).map(|update| update.view).unwrap_or(overlay.view())
    }

    #[test]
    fn opening_before_load_shows_spinner() {
        let mut overlay = Overlay::new();
        let view = open_view(&mut overlay);
        assert_eq!(overlay.state(), OverlayState::OpenLoading);
        assert!(view.overlay && view.spinner);
        assert!(!view.image && !view.error);
    }

    #[test]
    fn load_while_open_swaps_spinner_for_image() {
        let mut overlay = Overlay::new();
        overlay.handle(OverlayEvent::ThumbnailClicked);
        let update = overlay.handle(OverlayEvent::LargeImageLoaded).unwrap();
        assert_eq!(overlay.state(), OverlayState::OpenLoaded);
        assert!(update.view.image && !update.view.spinner);
        assert!(!update.replace_content_with_error);
    }

    #[test]
    fn background_load_is_invisible_until_next_open() {
        let mut overlay = Overlay::new();
        let update = overlay.handle(OverlayEvent::LargeImageLoaded).unwrap();
        assert_eq!(update.view, OverlayView::for_state(OverlayState::Closed));
        assert_eq!(overlay.large_image(), LargeImage::Loaded);

        let view = open_view(&mut overlay);
        assert!(view.image && !view.spinner);
    }

    #[test]
    fn every_dismissal_path_closes_from_every_open_state() {
        let dismissals = [OverlayEvent::BackdropClicked, OverlayEvent::LargeImageClicked, OverlayEvent::EscapePressed];
        let preludes: [&[OverlayEvent]; 3] = [
            &[],
            &[OverlayEvent::LargeImageLoaded],
            &[OverlayEvent::LargeImageFailed],
        ];

        for prelude in preludes {
            for dismissal in dismissals {
                let mut overlay = Overlay::new();
                for event in prelude {
                    overlay.handle(*event);
                }
                overlay.handle(OverlayEvent::ThumbnailClicked);
                assert_ne!(overlay.state(), OverlayState::Closed);

                let update = overlay.handle(dismissal).unwrap();
                assert_eq!(overlay.state(), OverlayState::Closed, "{dismissal:?} after {prelude:?}");
                assert!(!update.view.overlay);
            }
        }
    }

    #[test]
    fn dismissal_while_closed_is_a_no_op() {
        let mut overlay = Overlay::new();
        assert_eq!(overlay.handle(OverlayEvent::EscapePressed), None);
        assert_eq!(overlay.handle(OverlayEvent::BackdropClicked), None);
    }

    #[test]
    fn failure_is_permanent_across_open_close_cycles() {
        let mut overlay = Overlay::new();
        let update = overlay.handle(OverlayEvent::LargeImageFailed).unwrap();
        assert!(update.replace_content_with_error);
        assert!(!update.view.overlay);

        for _ in 0..3 {
            let view = open_view(&mut overlay);
            assert_eq!(overlay.state(), OverlayState::OpenErrored);
            assert!(view.error && !view.spinner && !view.image);
            overlay.handle(OverlayEvent::EscapePressed);
        }

        // neither a second failure nor a late load changes anything
        assert_eq!(overlay.handle(OverlayEvent::LargeImageFailed), None);
        assert_eq!(overlay.handle(OverlayEvent::LargeImageLoaded), None);
        assert_eq!(overlay.large_image(), LargeImage::Failed);
    }

    #[test]
    fn failed_preload_then_click_shows_message_not_spinner() {
        let mut overlay = Overlay::new();
        overlay.handle(OverlayEvent::LargeImageFailed);
        let update = overlay.handle(OverlayEvent::ThumbnailClicked).unwrap();
        assert!(update.view.error);
        assert!(!update.view.spinner);
        assert!(!update.replace_content_with_error);
    }

    #[test]
    fn views_are_mutually_exclusive() {
        for state in [OverlayState::Closed, OverlayState::OpenLoading, OverlayState::OpenLoaded, OverlayState::OpenErrored] {
            let view = OverlayView::for_state(state);
            let shown = [view.spinner, view.image, view.error].iter().filter(|flag| **flag).count();
            assert_eq!(shown, usize::from(view.overlay), "{state:?}");
        }
    }
}
