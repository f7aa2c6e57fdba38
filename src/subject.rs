use std::{
    fmt::Debug,
    ops::{Deref, DerefMut},
    sync::{Arc, Mutex, MutexGuard},
};

use crate::ReadOnlySubject;

/// Callback invoked with the new snapshot on every change.
///
/// Observers are compared by reference identity (the `Arc` allocation).
/// Subscribing the same `Observer` twice registers two independent entries,
/// and [`Subject::unsubscribe`] removes every entry sharing the allocation.
pub type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Wraps a callback so it can be subscribed and later unsubscribed by identity.
///
/// # Examples
/// ```
/// use state_containers::{observer, Subject};
///
/// let s = Subject::new(0);
/// let o = observer(|value: &i32| println!("{value}"));
///
/// s.subscribe(o.clone());
/// s.unsubscribe(&o);
/// ```
pub fn observer<T>(f: impl Fn(&T) + Send + Sync + 'static) -> Observer<T> {
    Arc::new(f)
}

/// Thread safe mutable value holder that notifies observers on every write.
///
/// Cloning a `Subject` clones the handle, not the state: all clones share the
/// same value and the same observer list.
///
/// # Examples
/// ```
/// use state_containers::Subject;
///
/// let s = Subject::new("🦀");
/// ```
#[derive(Clone, Default)]
pub struct Subject<T> {
    value: Arc<Mutex<T>>,
    observers: Arc<Mutex<Vec<Observer<T>>>>,
}

impl<T> Subject<T> {
    /// Constructs a new `Subject<T>` holding `value`.
    ///
    /// # Examples
    /// ```
    /// use state_containers::Subject;
    ///
    /// let s = Subject::new(0);
    /// assert_eq!(0, s.value());
    /// ```
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(Mutex::new(value)),
            observers: Default::default(),
        }
    }

    /// Returns a clone of the current snapshot.
    ///
    /// # Examples
    /// ```
    /// use state_containers::Subject;
    ///
    /// let s = Subject::new(String::from("🦀"));
    /// assert_eq!("🦀", s.value());
    /// ```
    pub fn value(&self) -> T
    where
        T: Clone,
    {
        self.acq_val_lock().clone()
    }

    /// Perform some action with a reference to the current snapshot.
    ///
    /// # Examples
    /// ```
    /// use state_containers::Subject;
    ///
    /// let s = Subject::new(String::from("🦀"));
    /// s.with_value(|v| println!("{}", v));
    /// ```
    pub fn with_value(&self, f: impl FnOnce(&T)) {
        f(self.acq_val_lock().deref());
    }

    /// Replaces the snapshot and notifies all observers with the new value,
    /// in the order they subscribed.
    ///
    /// Every call produces exactly one notification round, even when the new
    /// value equals the old one. Locks are released before the callbacks run,
    /// so an observer may subscribe, unsubscribe, or assign to this same
    /// subject re-entrantly; a nested assignment runs its full round before
    /// the outer round resumes.
    ///
    /// # Examples
    /// ```
    /// use state_containers::Subject;
    ///
    /// let s = Subject::new(10);
    /// s.set(34);
    ///
    /// assert_eq!(34, s.value());
    /// ```
    pub fn set(&self, value: T)
    where
        T: Clone,
    {
        let mut guard = self.acq_val_lock();
        *guard.deref_mut() = value;
        let snapshot = guard.clone();
        drop(guard);
        self.call_observers(&snapshot);
    }

    /// Replaces the snapshot based on its current value and notifies all
    /// observers, with the same semantics as [`Subject::set`].
    ///
    /// # Examples
    /// ```
    /// use state_containers::Subject;
    ///
    /// let s = Subject::new(10);
    /// s.update(|n| n * 2);
    ///
    /// assert_eq!(20, s.value());
    /// ```
    pub fn update(&self, f: impl FnOnce(&T) -> T)
    where
        T: Clone,
    {
        let mut guard = self.acq_val_lock();
        *guard.deref_mut() = f(guard.deref());
        let snapshot = guard.clone();
        drop(guard);
        self.call_observers(&snapshot);
    }

    /// Mutates the snapshot in place and notifies all observers, with the
    /// same semantics as [`Subject::set`].
    ///
    /// Prefer this when replacing only part of a larger value, like one field
    /// of a composed snapshot.
    ///
    /// # Examples
    /// ```
    /// use state_containers::Subject;
    ///
    /// let s = Subject::new(vec![1, 2, 3]);
    /// s.update_inplace(|nums| nums.push(4));
    ///
    /// assert_eq!(vec![1, 2, 3, 4], s.value());
    /// ```
    pub fn update_inplace(&self, f: impl FnOnce(&mut T))
    where
        T: Clone,
    {
        let mut guard = self.acq_val_lock();
        f(guard.deref_mut());
        let snapshot = guard.clone();
        drop(guard);
        self.call_observers(&snapshot);
    }

    /// Re-delivers the current snapshot to all observers without changing it.
    ///
    /// # Examples
    /// ```
    /// use state_containers::Subject;
    /// use std::sync::{Arc, Mutex};
    ///
    /// let s = Subject::new(String::from("🦀"));
    /// let seen: Arc<Mutex<Vec<String>>> = Default::default();
    ///
    /// s.add_observer({
    ///     let seen = seen.clone();
    ///     move |v: &String| seen.lock().unwrap().push(v.clone())
    /// });
    ///
    /// s.notify();
    /// s.notify();
    ///
    /// assert_eq!(
    ///     vec![String::from("🦀"), String::from("🦀")],
    ///     seen.lock().unwrap().clone()
    /// );
    /// ```
    pub fn notify(&self)
    where
        T: Clone,
    {
        let snapshot = self.acq_val_lock().clone();
        self.call_observers(&snapshot);
    }

    /// Appends an observer to the notification list.
    ///
    /// No de-duplication: subscribing the same handle twice means two
    /// invocations per round. An observer subscribed from inside a
    /// notification round is first invoked on the next assignment.
    ///
    /// # Examples
    /// ```
    /// use state_containers::{observer, Subject};
    /// use std::sync::{Arc, Mutex};
    ///
    /// let s = Subject::new(0);
    /// let seen: Arc<Mutex<Vec<i32>>> = Default::default();
    ///
    /// let o = observer({
    ///     let seen = seen.clone();
    ///     move |value: &i32| seen.lock().unwrap().push(*value)
    /// });
    /// s.subscribe(o);
    ///
    /// s.set(1);
    /// s.set(2);
    ///
    /// assert_eq!(vec![1, 2], seen.lock().unwrap().clone());
    /// ```
    pub fn subscribe(&self, observer: Observer<T>) {
        self.acq_obs_lock().push(observer);
    }

    /// Removes every entry matching `observer` by reference identity.
    ///
    /// A no-op if the observer was never subscribed. Once removed, a
    /// subsequently fired notification never reaches it.
    ///
    /// # Examples
    /// ```
    /// use state_containers::{observer, Subject};
    /// use std::sync::{Arc, Mutex};
    ///
    /// let s = Subject::new(0);
    /// let seen: Arc<Mutex<Vec<i32>>> = Default::default();
    ///
    /// let o = observer({
    ///     let seen = seen.clone();
    ///     move |value: &i32| seen.lock().unwrap().push(*value)
    /// });
    /// s.subscribe(o.clone());
    ///
    /// s.set(1);
    /// s.unsubscribe(&o);
    /// s.set(2);
    ///
    /// assert_eq!(vec![1], seen.lock().unwrap().clone());
    /// ```
    pub fn unsubscribe(&self, observer: &Observer<T>) {
        self.acq_obs_lock().retain(|obs| !Arc::ptr_eq(obs, observer));
    }

    /// Wraps `f` into an [`Observer`], subscribes it, and returns the handle
    /// so it can be unsubscribed later.
    ///
    /// # Examples
    /// ```
    /// use state_containers::Subject;
    /// use std::sync::{Arc, Mutex};
    ///
    /// let s: Subject<String> = Subject::default();
    /// let changes: Arc<Mutex<Vec<String>>> = Default::default();
    ///
    /// let o = s.add_observer({
    ///     let changes = changes.clone();
    ///     move |val: &String| changes.lock().unwrap().push(val.clone())
    /// });
    ///
    /// s.set(String::from("🦀"));
    /// s.unsubscribe(&o);
    /// s.set(String::from("🦞"));
    ///
    /// assert_eq!(vec![String::from("🦀")], changes.lock().unwrap().clone());
    /// ```
    pub fn add_observer(&self, f: impl Fn(&T) + Send + Sync + 'static) -> Observer<T> {
        let observer: Observer<T> = Arc::new(f);
        self.subscribe(observer.clone());
        observer
    }

    /// Drops every registration from the notification list.
    ///
    /// # Examples
    /// ```
    /// use state_containers::Subject;
    ///
    /// let s = Subject::new(10);
    /// let d = s.derive(|val| val + 1);
    ///
    /// s.clear_observers();
    /// s.set(20);
    ///
    /// assert_eq!(20, s.value());
    /// // `d` no longer follows `s`
    /// assert_eq!(11, d.value());
    /// ```
    pub fn clear_observers(&self) {
        self.acq_obs_lock().clear();
    }

    /// Derives a child subject that recomputes through `f` whenever this
    /// subject notifies.
    ///
    /// The initial value is computed eagerly from the current snapshot.
    ///
    /// # Examples
    /// ```
    /// use state_containers::Subject;
    ///
    /// let s = Subject::new(10);
    /// let d = s.derive(|val| val + 5);
    ///
    /// assert_eq!(15, d.value());
    ///
    /// s.set(20);
    /// assert_eq!(25, d.value());
    /// ```
    pub fn derive<U>(&self, f: impl Fn(&T) -> U + Send + Sync + 'static) -> Subject<U>
    where
        T: Clone,
        U: Clone + Send + Sync + 'static,
    {
        let derived = Subject::new(f(self.acq_val_lock().deref()));

        self.subscribe({
            let derived = derived.clone();
            Arc::new(move |value: &T| derived.set(f(value)))
        });

        derived
    }

    /// Returns a new [`ReadOnlySubject`] view bound to this subject.
    ///
    /// Each call yields an independent view sharing the same underlying data
    /// and notification stream. Consumers holding only the view cannot write.
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
    pub fn read_only(&self) -> ReadOnlySubject<T>
    where
        T: Clone,
    {
        ReadOnlySubject::new(self.clone())
    }

    // The list is snapshotted and both locks are released before any callback
    // runs, so observers may subscribe, unsubscribe, or assign re-entrantly.
    // Entries added or removed mid-round take effect from the next round.
    fn call_observers(&self, value: &T) {
        let observers = self.acq_obs_lock().clone();
        for obs in &observers {
            obs(value);
        }
    }

    pub(crate) fn acq_val_lock(&self) -> MutexGuard<'_, T> {
        self.value.lock().expect("unable to acquire lock on value")
    }

    fn acq_obs_lock(&self) -> MutexGuard<'_, Vec<Observer<T>>> {
        self.observers
            .lock()
            .expect("unable to acquire lock on observers")
    }
}

impl<T: Debug> Debug for Subject<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Subject")
            .field(self.acq_val_lock().deref())
            .finish()
    }
}
