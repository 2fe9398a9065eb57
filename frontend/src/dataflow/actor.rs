//! Single-value Actor owning one controller's state
//!
//! The Actor owns a `Mutable<T>` and a task that drains its Relays one event
//! at a time, so every controller mutates its state strictly in dispatch
//! order.

use std::future::Future;
use std::sync::Arc;
use zoon::{Mutable, Signal, Task, TaskHandle};

/// Reactive state container driven by a single processing loop.
///
/// DOM element handles are not `Send`, so unlike the state itself the
/// processor future is only required to be `'static`. It runs on the page's
/// event loop next to the listeners feeding it.
///
/// # Examples
///
/// ```rust
/// let (toggle_clicked_relay, toggle_clicked_stream) = relay();
///
/// let theme = Actor::new(ThemeSwitcher::new(Theme::Light), async move |state| {
///     let mut toggle_clicked = toggle_clicked_stream.fuse();
///     while let Some(()) = toggle_clicked.next().await {
///         state.lock_mut().handle(ThemeEvent::ToggleClicked);
///     }
/// });
/// ```
#[derive(Clone, Debug)]
pub struct Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    state: Mutable<T>,
    // Dropping the last handle aborts the processor
    #[allow(dead_code)]
    task_handle: Arc<TaskHandle>,
}

impl<T> Actor<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F, Fut>(initial_state: T, processor: F) -> Self
    where
        F: FnOnce(Mutable<T>) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let state = Mutable::new(initial_state);
        let task_handle = Arc::new(Task::start_droppable(processor(state.clone())));

        Self { state, task_handle }
    }

    /// The only read access to Actor state.
    pub fn signal(&self) -> impl Signal<Item = T> + use<T> {
        self.state.signal_cloned()
    }
}
