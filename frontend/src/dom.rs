//! Thin helpers over `web_sys` shared by the controllers.
//!
//! Lookups return `Option` on purpose: a missing element switches off the
//! feature that needs it and is never reported as an error.

use futures::channel::oneshot;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys::{Document, DocumentReadyState, Element, Event, EventTarget, HtmlElement, HtmlImageElement};

#[derive(Debug, Error)]
pub enum DomError {
    #[error("no browser window")]
    NoWindow,
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        let message = value.as_string().unwrap_or_else(|| format!("{value:?}"));
        DomError::Js(message)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageOutcome {
    Loaded,
    Failed,
}

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|window| window.document())
}

/// Finds an element by id and casts it, `None` if absent or of another type.
pub fn element_by_id<T: JsCast>(id: &str) -> Option<T> {
    document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn query_all(selector: &str) -> Result<Vec<Element>, DomError> {
    let document = document().ok_or(DomError::NoWindow)?;
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Registers `handler` for the page lifetime. Listeners are never removed.
pub fn on<E>(target: &EventTarget, event: &str, handler: impl FnMut(E) + 'static) -> Result<(), DomError>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn set_shown(element: &HtmlElement, shown: bool, display: &str) {
    let value = if shown { display } else { "none" };
    if let Err(error) = element.style().set_property("display", value) {
        zoon::eprintln!("🚨 Failed to set display on #{}: {}", element.id(), DomError::from(error));
    }
}

pub fn disable(element: &Element) {
    if let Err(error) = element.set_attribute("disabled", "") {
        zoon::eprintln!("🚨 Failed to disable #{}: {}", element.id(), DomError::from(error));
    }
}

/// Resolves once the window `load` event has fired, immediately if it
/// already has.
pub async fn window_loaded() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let already_loaded = window
        .document()
        .is_some_and(|document| document.ready_state() == DocumentReadyState::Complete);
    if already_loaded {
        return;
    }

    let (sender, receiver) = oneshot::channel::<()>();
    let mut sender = Some(sender);
    let registered = on(&window, "load", move |_: Event| {
        if let Some(sender) = sender.take() {
            let _ = sender.send(());
        }
    });
    match registered {
        Ok(()) => {
            let _ = receiver.await;
        }
        Err(error) => zoon::eprintln!("🚨 Could not wait for page load, starting now: {error}"),
    }
}

/// Watches `image` for its next `load` or `error` event.
///
/// Both listeners are registered before the caller assigns `src`, so a
/// cached image that settles immediately is not missed. Only the first event
/// resolves the receiver.
pub fn image_settled(image: &HtmlImageElement) -> Result<oneshot::Receiver<ImageOutcome>, DomError> {
    let (sender, receiver) = oneshot::channel();
    let sender = Rc::new(RefCell::new(Some(sender)));

    for (event, outcome) in [("load", ImageOutcome::Loaded), ("error", ImageOutcome::Failed)] {
        let sender = Rc::clone(&sender);
        on(image, event, move |_: Event| {
            if let Some(sender) = sender.borrow_mut().take() {
                let _ = sender.send(outcome);
            }
        })?;
    }
    Ok(receiver)
}

/// Awaits a receiver from [`image_settled`]; a dropped sender counts as failure.
pub async fn await_image(receiver: oneshot::Receiver<ImageOutcome>) -> ImageOutcome {
    receiver.await.unwrap_or(ImageOutcome::Failed)
}
