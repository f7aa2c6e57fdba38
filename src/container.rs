use crate::{ReadOnlySubject, Subject};

type Cleanup = Box<dyn FnOnce() + Send>;

/// Bundles a read-only state subject with the actions that drive it.
///
/// The owner constructs the state [`Subject`], keeps the writable handle for
/// itself inside `actions`, and hands consumers this container: they can read
/// and subscribe through [`StateContainer::state`] and mutate only through
/// [`StateContainer::actions`]. An optional cleanup callback tears down any
/// side effects the owner started (timers, tasks); the consumer runs it once
/// when it is done with the container.
///
/// # Examples
/// ```
/// use state_containers::{StateContainer, Subject};
///
/// struct CounterActions {
///     count: Subject<i32>,
/// }
///
/// impl CounterActions {
///     fn increment(&self) {
///         self.count.update(|n| n + 1);
///     }
/// }
///
/// let count = Subject::new(0);
/// let container = StateContainer::new(&count, CounterActions { count: count.clone() });
///
/// container.actions().increment();
/// assert_eq!(1, container.state().value());
/// ```
pub struct StateContainer<S, A> {
    state: ReadOnlySubject<S>,
    actions: A,
    cleanup: Option<Cleanup>,
}

impl<S, A> StateContainer<S, A> {
    /// Builds a container over a read-only view of `state`.
    pub fn new(state: &Subject<S>, actions: A) -> Self
    where
        S: Clone,
    {
        Self {
            state: state.read_only(),
            actions,
            cleanup: None,
        }
    }

    /// Attaches an owner-supplied teardown callback.
    pub fn with_cleanup(mut self, cleanup: impl FnOnce() + Send + 'static) -> Self {
        self.cleanup = Some(Box::new(cleanup));
        self
    }

    /// The read-only state subject consumers subscribe to.
    pub fn state(&self) -> &ReadOnlySubject<S> {
        &self.state
    }

    /// The opaque actions value; all mutation flows through it.
    pub fn actions(&self) -> &A {
        &self.actions
    }

    /// Runs the cleanup callback, if any. Later calls do nothing.
    ///
    /// # Examples
    /// ```
    /// use state_containers::{StateContainer, Subject};
    /// use std::sync::{Arc, Mutex};
    ///
    /// let state = Subject::new(0);
    /// let runs: Arc<Mutex<u32>> = Default::default();
    ///
    /// let mut container = StateContainer::new(&state, ()).with_cleanup({
    ///     let runs = runs.clone();
    ///     move || *runs.lock().unwrap() += 1
    /// });
    ///
    /// container.cleanup();
    /// container.cleanup();
    ///
    /// assert_eq!(1, *runs.lock().unwrap());
    /// ```
    pub fn cleanup(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}
