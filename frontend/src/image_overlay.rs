//! Click-to-zoom lightbox for the profile picture.
//!
//! Every element is optional. Without a thumbnail the overlay can't open,
//! without a backdrop it only closes via Escape or the image itself, and so
//! on. The high-resolution image is fetched once in the background; its
//! outcome reaches the Actor even while the overlay is closed.

use crate::dataflow::{Actor, relay};
use crate::dom::{self, ImageOutcome};
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use gloo_timers::future::TimeoutFuture;
use shared::{IMAGE_ERROR_MESSAGE, LargeImage, Overlay, OverlayEvent, OverlayUpdate};
use web_sys::{Element, Event, HtmlElement, HtmlImageElement, KeyboardEvent};
use zoon::*;

pub const THUMBNAIL_ID: &str = "profile-picture";
pub const OVERLAY_ID: &str = "image-overlay";
pub const BACKDROP_ID: &str = "overlay-bg";
pub const CONTENT_ID: &str = "overlay-content";
pub const SPINNER_ID: &str = "spinner";
pub const LARGE_IMAGE_ID: &str = "large-profile-picture";
const LARGE_SRC_ATTRIBUTE: &str = "data-large-src";

pub struct ImageOverlay {
    #[allow(dead_code)]
    overlay: Actor<Overlay>,
}

/// Elements the Actor writes to.
struct OverlayTargets {
    overlay: Option<HtmlElement>,
    content: Option<Element>,
    spinner: Option<HtmlElement>,
    large_image: Option<HtmlImageElement>,
}

impl OverlayTargets {
    fn lookup() -> Self {
        Self {
            overlay: dom::element_by_id(OVERLAY_ID),
            content: dom::element_by_id(CONTENT_ID),
            spinner: dom::element_by_id(SPINNER_ID),
            large_image: dom::element_by_id(LARGE_IMAGE_ID),
        }
    }

    fn apply(&self, update: OverlayUpdate) {
        if update.replace_content_with_error {
            self.show_error_message();
        }
        let view = update.view;
        if let Some(overlay) = &self.overlay {
            dom::set_shown(overlay, view.overlay, "flex");
        }
        // hidden overlay: leave the inner elements as they are
        if !view.overlay {
            return;
        }
        if let Some(spinner) = &self.spinner {
            dom::set_shown(spinner, view.spinner, "block");
        }
        if let Some(large_image) = &self.large_image {
            dom::set_shown(large_image, view.image, "block");
        }
    }

    fn show_error_message(&self) {
        let Some(content) = &self.content else {
            return;
        };
        let message = dom::document().and_then(|document| document.create_element("p").ok());
        match message {
            Some(message) => {
                message.set_class_name("overlay-error");
                message.set_text_content(Some(IMAGE_ERROR_MESSAGE));
                content.set_inner_html("");
                if let Err(error) = content.append_child(&message) {
                    zoon::eprintln!("🚨 Failed to show image error: {}", dom::DomError::from(error));
                }
            }
            None => content.set_text_content(Some(IMAGE_ERROR_MESSAGE)),
        }
    }
}

impl ImageOverlay {
    pub fn start(preload_delay_ms: u32) -> Self {
        let thumbnail = dom::element_by_id::<Element>(THUMBNAIL_ID);
        let backdrop = dom::element_by_id::<Element>(BACKDROP_ID);
        let targets = OverlayTargets::lookup();

        let (thumbnail_clicked_relay, thumbnail_clicked_stream) = relay::<()>();
        let (backdrop_clicked_relay, backdrop_clicked_stream) = relay::<()>();
        let (large_image_clicked_relay, large_image_clicked_stream) = relay::<()>();
        let (escape_pressed_relay, escape_pressed_stream) = relay::<()>();
        let (large_image_loaded_relay, large_image_loaded_stream) = relay::<()>();
        let (large_image_failed_relay, large_image_failed_stream) = relay::<()>();

        let mut wired = Vec::new();
        if let Some(thumbnail) = &thumbnail {
            wired.push(dom::on(thumbnail, "click", move |_: Event| thumbnail_clicked_relay.send(())));
        }
        if let Some(backdrop) = &backdrop {
            wired.push(dom::on(backdrop, "click", move |_: Event| backdrop_clicked_relay.send(())));
        }
        if let Some(large_image) = &targets.large_image {
            wired.push(dom::on(large_image, "click", move |_: Event| large_image_clicked_relay.send(())));
        }
        if let Some(document) = dom::document() {
            wired.push(dom::on(&document, "keydown", move |event: KeyboardEvent| {
                if event.key() == "Escape" {
                    escape_pressed_relay.send(());
                }
            }));
        }
        for error in wired.into_iter().filter_map(Result::err) {
            zoon::eprintln!("🚨 Overlay listener not wired: {error}");
        }

        // Fire-and-forget: runs once, whatever the overlay is doing meanwhile
        match (thumbnail, targets.large_image.clone()) {
            (Some(thumbnail), Some(large_image)) => Task::start(async move {
                TimeoutFuture::new(preload_delay_ms).await;
                match preload_large_image(&thumbnail, &large_image).await {
                    Some(ImageOutcome::Loaded) => large_image_loaded_relay.send(()),
                    Some(ImageOutcome::Failed) => large_image_failed_relay.send(()),
                    None => {}
                }
            }),
            _ => zoon::println!("🖼️ No profile picture pair on this page, preload skipped"),
        }

        let events: Vec<BoxStream<'static, OverlayEvent>> = vec![
            thumbnail_clicked_stream.map(|()| OverlayEvent::ThumbnailClicked).boxed(),
            backdrop_clicked_stream.map(|()| OverlayEvent::BackdropClicked).boxed(),
            large_image_clicked_stream.map(|()| OverlayEvent::LargeImageClicked).boxed(),
            escape_pressed_stream.map(|()| OverlayEvent::EscapePressed).boxed(),
            large_image_loaded_stream.map(|()| OverlayEvent::LargeImageLoaded).boxed(),
            large_image_failed_stream.map(|()| OverlayEvent::LargeImageFailed).boxed(),
        ];

        let overlay = Actor::new(Overlay::new(), async move |state| {
            let mut events = stream::select_all(events);
            while let Some(event) = events.next().await {
                let update = state.lock_mut().handle(event);
                if let Some(update) = update {
                    targets.apply(update);
                }
            }
        });

        Task::start(
            overlay
                .signal()
                .map(|overlay| overlay.large_image())
                .dedupe()
                .for_each(|large_image| {
                    match large_image {
                        LargeImage::Pending => {}
                        LargeImage::Loaded => zoon::println!("🖼️ Large profile picture ready"),
                        LargeImage::Failed => zoon::eprintln!("🚨 Large profile picture failed to load"),
                    }
                    async {}
                }),
        );

        Self { overlay }
    }
}

/// Reads the high-resolution URL once and loads it into the large image.
async fn preload_large_image(thumbnail: &Element, large_image: &HtmlImageElement) -> Option<ImageOutcome> {
    let Some(source) = thumbnail.get_attribute(LARGE_SRC_ATTRIBUTE) else {
        zoon::println!("🖼️ #{THUMBNAIL_ID} has no {LARGE_SRC_ATTRIBUTE}, nothing to preload");
        return None;
    };
    let settled = match dom::image_settled(large_image) {
        Ok(settled) => settled,
        Err(error) => {
            zoon::eprintln!("🚨 Large image listeners not wired: {error}");
            return None;
        }
    };
    large_image.set_src(&source);
    Some(dom::await_image(settled).await)
}
