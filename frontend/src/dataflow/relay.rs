//! Event streaming from DOM listeners into Actors
//!
//! A Relay is the sending half of an unbounded channel. DOM callbacks own a
//! clone and `send` into it; the owning Actor drains the receiver in order.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use std::sync::{Arc, OnceLock};

/// Type-safe event relay.
///
/// # Event-Source Naming Convention
///
/// Relays follow the `{source}_{event}_relay` pattern:
/// - `toggle_clicked_relay` - user clicked the theme toggle
/// - `large_image_loaded_relay` - deferred preload finished
/// - `form_submitted_relay` - contact form submit event
///
/// # Examples
///
/// ```rust
/// use crate::dataflow::relay;
///
/// let (escape_pressed_relay, mut escape_pressed_stream) = relay::<()>();
///
/// escape_pressed_relay.send(());
///
/// while let Some(()) = escape_pressed_stream.next().await {
///     // close the overlay
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    sender: UnboundedSender<T>,
    #[cfg(debug_assertions)]
    emit_location: Arc<OnceLock<&'static std::panic::Location<'static>>>,
}

#[derive(Debug, Clone)]
pub enum RelayError {
    /// The receiver was dropped, its Actor is gone
    ChannelClosed,
    /// Relay send called from multiple locations (debug builds only)
    #[cfg(debug_assertions)]
    MultipleEmitters {
        previous: &'static std::panic::Location<'static>,
        current: &'static std::panic::Location<'static>,
    },
}

impl<T> Relay<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> (Self, UnboundedReceiver<T>) {
        let (sender, receiver) = unbounded();
        (
            Relay {
                sender,
                #[cfg(debug_assertions)]
                emit_location: Arc::new(OnceLock::new()),
            },
            receiver,
        )
    }

    /// Every relay has exactly one emitting call site. Debug builds reject a
    /// second one so that each DOM event keeps its own relay.
    #[cfg(debug_assertions)]
    #[track_caller]
    fn check_single_source(&self) -> Result<(), RelayError> {
        let caller = std::panic::Location::caller();
        match self.emit_location.set(caller) {
            Ok(()) => Ok(()),
            Err(previous) if previous == caller => Ok(()),
            Err(previous) => Err(RelayError::MultipleEmitters {
                previous,
                current: caller,
            }),
        }
    }

    /// Sends an event, silently dropping it when the Actor is gone.
    ///
    /// Panics in debug builds when called from a second source location.
    #[track_caller]
    pub fn send(&self, value: T) {
        #[cfg(debug_assertions)]
        if let Err(e) = self.check_single_source() {
            panic!("{:?}", e);
        }

        let _ = self.sender.unbounded_send(value);
    }

    #[track_caller]
    pub fn try_send(&self, value: T) -> Result<(), RelayError> {
        #[cfg(debug_assertions)]
        self.check_single_source()?;

        self.sender
            .unbounded_send(value)
            .map_err(|_| RelayError::ChannelClosed)
    }
}

/// Creates a Relay with its receiver stream.
pub fn relay<T>() -> (Relay<T>, UnboundedReceiver<T>)
where
    T: Clone + Send + Sync + 'static,
{
    Relay::new()
}
