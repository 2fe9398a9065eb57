//! One-shot lazy loading of the project thumbnails.

use crate::dom::{self, ImageOutcome};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;
use zoon::*;

pub const PROJECT_IMAGE_SELECTOR: &str = ".project-image[data-src]";
const DEFERRED_SRC_ATTRIBUTE: &str = "data-src";

/// After `delay_ms`, assigns every deferred source at once and fades each
/// image in when it has loaded. Images that fail stay transparent.
pub fn start(delay_ms: u32) {
    Task::start(async move {
        TimeoutFuture::new(delay_ms).await;

        let elements = match dom::query_all(PROJECT_IMAGE_SELECTOR) {
            Ok(elements) => elements,
            Err(error) => {
                zoon::eprintln!("🚨 Project images not found: {error}");
                return;
            }
        };

        let mut started = 0;
        for element in elements {
            match element.dyn_into::<HtmlImageElement>() {
                Ok(image) => {
                    started += 1;
                    Task::start(reveal(image));
                }
                Err(element) => zoon::println!("🖼️ Skipping non-image {} in project list", element.tag_name()),
            }
        }
        zoon::println!("🖼️ Loading {started} project images");
    });
}

async fn reveal(image: HtmlImageElement) {
    let Some(source) = image.get_attribute(DEFERRED_SRC_ATTRIBUTE) else {
        return;
    };
    let settled = match dom::image_settled(&image) {
        Ok(settled) => settled,
        Err(error) => {
            zoon::eprintln!("🚨 Project image listeners not wired: {error}");
            return;
        }
    };
    image.set_src(&source);

    match dom::await_image(settled).await {
        ImageOutcome::Loaded => {
            if let Err(error) = image.style().set_property("opacity", "1") {
                zoon::eprintln!("🚨 Failed to reveal {source}: {}", dom::DomError::from(error));
            }
        }
        ImageOutcome::Failed => zoon::eprintln!("🚨 Project image {source} failed to load"),
    }
}
