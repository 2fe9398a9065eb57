//! Contact form with a single asynchronous submission.
//!
//! Known limitation: a transport failure is only logged. The button keeps
//! its "sending" label and stays disabled, there is no retry path.

use crate::dataflow::{Actor, Relay, relay};
use crate::dom::{self, DomError};
use futures::{StreamExt, select};
use shared::{Locale, Submission, SubmissionEffect, SubmissionEvent};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, Event, FormData, HtmlFormElement, RequestInit, Response};
use zoon::*;

pub const FORM_ID: &str = "contact-form";
pub const SUBMIT_BUTTON_ID: &str = "submit-button";
pub const FIELD_IDS: [&str; 3] = ["name", "email", "textarea"];

pub struct ContactForm {
    #[allow(dead_code)]
    submission: Actor<Submission>,
}

struct FormTargets {
    form: HtmlFormElement,
    button: Element,
    fields: Vec<Element>,
}

impl ContactForm {
    /// Returns `None` without a form and button, or when the page language
    /// has no status strings.
    pub fn start(endpoint: String) -> Option<Self> {
        let form = dom::element_by_id::<HtmlFormElement>(FORM_ID)?;
        let Some(button) = dom::element_by_id::<Element>(SUBMIT_BUTTON_ID) else {
            zoon::println!("📨 #{FORM_ID} has no #{SUBMIT_BUTTON_ID}, asynchronous submission disabled");
            return None;
        };
        let fields = FIELD_IDS.iter().filter_map(|id| dom::element_by_id::<Element>(id)).collect();

        let lang = dom::document()
            .and_then(|document| document.document_element())
            .and_then(|root| root.get_attribute("lang"));
        let locale = match Locale::from_lang_attribute(lang.as_deref()) {
            Ok(locale) => locale,
            Err(error) => {
                zoon::eprintln!("🚨 Contact form disabled: {error}");
                return None;
            }
        };

        let (form_submitted_relay, form_submitted_stream) = relay::<()>();
        let (response_received_relay, response_received_stream) = relay::<u16>();
        let (transport_failed_relay, transport_failed_stream) = relay::<String>();

        let wired = dom::on(&form, "submit", move |event: Event| {
            event.prevent_default();
            form_submitted_relay.send(());
        });
        if let Err(error) = wired {
            zoon::eprintln!("🚨 Contact form submit not wired: {error}");
            return None;
        }

        let targets = FormTargets { form, button, fields };
        let submission = Actor::new(Submission::new(locale), async move |state| {
            let mut form_submitted = form_submitted_stream.fuse();
            let mut response_received = response_received_stream.fuse();
            let mut transport_failed = transport_failed_stream.fuse();

            loop {
                let event = select! {
                    submitted = form_submitted.next() => match submitted {
                        Some(()) => SubmissionEvent::FormSubmitted,
                        None => break,
                    },
                    status = response_received.next() => match status {
                        Some(status) => {
                            zoon::println!("📨 Contact form delivered, server answered {status}");
                            SubmissionEvent::ResponseReceived
                        }
                        None => break,
                    },
                    failure = transport_failed.next() => match failure {
                        Some(failure) => {
                            zoon::eprintln!("🚨 Request to server failed: {failure}");
                            SubmissionEvent::TransportFailed
                        }
                        None => break,
                    },
                };

                let effect = state.lock_mut().handle(event);
                match effect {
                    Some(SubmissionEffect::BeginSending { label }) => {
                        targets.button.set_text_content(Some(label));
                        dom::disable(&targets.button);
                        Task::start(send_form(
                            targets.form.clone(),
                            endpoint.clone(),
                            response_received_relay.clone(),
                            transport_failed_relay.clone(),
                        ));
                    }
                    Some(SubmissionEffect::MarkSent { label }) => {
                        targets.button.set_text_content(Some(label));
                        for field in &targets.fields {
                            dom::disable(field);
                        }
                    }
                    Some(SubmissionEffect::ReportFailure) => {
                        zoon::eprintln!("🚨 Contact form stays pending, reload the page to try again");
                    }
                    None => {}
                }
            }
        });

        zoon::println!("📨 Contact form ready ({})", locale.code());
        Some(Self { submission })
    }
}

async fn send_form(
    form: HtmlFormElement,
    endpoint: String,
    response_received_relay: Relay<u16>,
    transport_failed_relay: Relay<String>,
) {
    let delivered = match post_form(&form, &endpoint).await {
        Ok(status) => response_received_relay.try_send(status),
        Err(error) => transport_failed_relay.try_send(error.to_string()),
    };
    if delivered.is_err() {
        zoon::eprintln!("🚨 Contact form controller gone before the response arrived");
    }
}

/// POSTs the form as multipart data. Any HTTP response counts as delivered,
/// only a rejected fetch is an error.
async fn post_form(form: &HtmlFormElement, endpoint: &str) -> Result<u16, DomError> {
    let window = web_sys::window().ok_or(DomError::NoWindow)?;
    let body = FormData::new_with_form(form)?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&body);

    let response = JsFuture::from(window.fetch_with_str_and_init(endpoint, &init)).await?;
    let response: Response = response.dyn_into()?;
    Ok(response.status())
}
