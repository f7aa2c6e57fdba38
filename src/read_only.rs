use std::{fmt::Debug, ops::Deref};

use crate::{Observer, Subject};

/// A non-owning view of a [`Subject`] that exposes reads and subscriptions
/// but no mutation.
///
/// The view is a capability restriction, not a copy: it shares the same
/// underlying value and notification stream as the subject it was created
/// from, so it never diverges from it in observable value or notification
/// order. Writing requires the [`Subject`] handle itself, which the view
/// deliberately does not expose.
///
/// # Examples
/// ```
/// use state_containers::Subject;
///
/// let s = Subject::new(0);
/// let r = s.read_only();
///
/// s.set(1);
/// assert_eq!(1, r.value());
/// ```
#[derive(Clone)]
pub struct ReadOnlySubject<T> {
    subject: Subject<T>,
}

impl<T> ReadOnlySubject<T> {
    pub(crate) fn new(subject: Subject<T>) -> Self {
        Self { subject }
    }

    /// Returns a clone of the underlying subject's current snapshot.
    pub fn value(&self) -> T
    where
        T: Clone,
    {
        self.subject.value()
    }

    /// Perform some action with a reference to the current snapshot.
    pub fn with_value(&self, f: impl FnOnce(&T)) {
        self.subject.with_value(f);
    }

    /// Forwards to [`Subject::subscribe`] on the underlying subject.
    ///
    /// Ordering and identity semantics are identical to subscribing on the
    /// subject directly.
    pub fn subscribe(&self, observer: Observer<T>) {
        self.subject.subscribe(observer);
    }

    /// Forwards to [`Subject::unsubscribe`] on the underlying subject.
    pub fn unsubscribe(&self, observer: &Observer<T>) {
        self.subject.unsubscribe(observer);
    }

    /// Forwards to [`Subject::add_observer`] on the underlying subject,
    /// returning the handle for later unsubscription.
    ///
    /// # Examples
    /// ```
    /// use state_containers::Subject;
    /// use std::sync::{Arc, Mutex};
    ///
    /// let s = Subject::new(0);
    /// let r = s.read_only();
    /// let seen: Arc<Mutex<Vec<i32>>> = Default::default();
    ///
    /// let o = r.add_observer({
    ///     let seen = seen.clone();
    ///     move |value: &i32| seen.lock().unwrap().push(*value)
    /// });
    ///
    /// s.set(1);
    /// r.unsubscribe(&o);
    /// s.set(2);
    ///
    /// assert_eq!(vec![1], seen.lock().unwrap().clone());
    /// ```
    pub fn add_observer(&self, f: impl Fn(&T) + Send + Sync + 'static) -> Observer<T> {
        self.subject.add_observer(f)
    }
}

impl<T: Clone> From<&Subject<T>> for ReadOnlySubject<T> {
    fn from(subject: &Subject<T>) -> Self {
        subject.read_only()
    }
}

impl<T> From<Subject<T>> for ReadOnlySubject<T> {
    fn from(subject: Subject<T>) -> Self {
        Self { subject }
    }
}

impl<T: Debug> Debug for ReadOnlySubject<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ReadOnlySubject")
            .field(self.subject.acq_val_lock().deref())
            .finish()
    }
}
