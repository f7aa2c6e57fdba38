use paste::paste;

use crate::{observer, ReadOnlySubject, Subject};

/// One slot of a composed snapshot: something with a current value and,
/// for the live implementations, a stream of future values.
///
/// Implemented by [`Subject`] and [`ReadOnlySubject`] (live slots that keep
/// feeding the composed snapshot), by references to any source, and by
/// [`Plain`] (an ordinary value copied into the snapshot once).
pub trait Source {
    /// Value type this source contributes to the snapshot.
    type Item: Clone + Send + Sync + 'static;

    /// The source's current inner value.
    fn current(&self) -> Self::Item;

    /// Registers `sink` to receive every future value of this source.
    ///
    /// The registration is permanent: composition links are established once
    /// and there is no way to sever or rewire them afterwards.
    fn link(&self, sink: impl Fn(Self::Item) + Send + Sync + 'static);
}

impl<T: Clone + Send + Sync + 'static> Source for Subject<T> {
    type Item = T;

    fn current(&self) -> T {
        self.value()
    }

    fn link(&self, sink: impl Fn(T) + Send + Sync + 'static) {
        self.subscribe(observer(move |value: &T| sink(value.clone())));
    }
}

impl<T: Clone + Send + Sync + 'static> Source for ReadOnlySubject<T> {
    type Item = T;

    fn current(&self) -> T {
        self.value()
    }

    fn link(&self, sink: impl Fn(T) + Send + Sync + 'static) {
        self.subscribe(observer(move |value: &T| sink(value.clone())));
    }
}

impl<S: Source> Source for &S {
    type Item = S::Item;

    fn current(&self) -> Self::Item {
        (*self).current()
    }

    fn link(&self, sink: impl Fn(Self::Item) + Send + Sync + 'static) {
        (*self).link(sink);
    }
}

/// A slot holding an ordinary value.
///
/// The value is cloned into the composed snapshot at construction and never
/// produces updates, so the snapshot does not alias the caller's input.
///
/// # Examples
/// ```
/// use state_containers::{Compose, Plain, Subject};
///
/// let count = Subject::new(0);
/// let s = (&count, Plain("title")).compose();
///
/// count.set(3);
/// assert_eq!((3, "title"), s.value());
/// ```
pub struct Plain<T>(pub T);

impl<T: Clone + Send + Sync + 'static> Source for Plain<T> {
    type Item = T;

    fn current(&self) -> T {
        self.0.clone()
    }

    fn link(&self, _sink: impl Fn(T) + Send + Sync + 'static) {}
}

/// Composes a tuple of [`Source`]s into one subject over their current
/// inner values.
///
/// This is how nested containers are expressed: placing a [`Subject`] (or
/// [`ReadOnlySubject`]) in a slot creates a propagation link, so any later
/// change to it patches that slot of the composed snapshot and runs the
/// composed subject's full notification path, all other slots retained
/// unchanged. Unwrapping is one level deep per nesting; a composed subject's
/// own value is itself already a snapshot, so chains of nesting unwrap all
/// the way down.
///
/// Links are computed once, here. Replacing the composed subject's whole
/// snapshot afterwards neither rewires nor severs them.
///
/// # Examples
/// ```
/// use state_containers::{Compose, Subject};
///
/// let sub = Subject::new(0);
/// let parent = (&sub,).compose();
///
/// sub.set(1);
/// assert_eq!((1,), parent.value());
/// ```
pub trait Compose {
    /// The tuple of the sources' inner values.
    type Snapshot: Clone + Send + Sync + 'static;

    fn compose(self) -> Subject<Self::Snapshot>;
}

macro_rules! impl_compose {
    ( $($i:literal,)* ) => { paste!{
        impl< $([<S $i>]: Source,)* > Compose for ( $([<S $i>],)* ) {
            type Snapshot = ( $([<S $i>]::Item,)* );

            fn compose(self) -> Subject<Self::Snapshot> {
                let composed = Subject::new(( $(self.$i.current(),)* ));

                $( self.$i.link({
                    let composed = composed.clone();
                    move |value| composed.update_inplace(|snapshot| snapshot.$i = value)
                }); )*

                composed
            }
        }
    }};
}

impl_compose!(0,);
impl_compose!(0, 1,);
impl_compose!(0, 1, 2,);
impl_compose!(0, 1, 2, 3,);
impl_compose!(0, 1, 2, 3, 4,);
impl_compose!(0, 1, 2, 3, 4, 5,);
impl_compose!(0, 1, 2, 3, 4, 5, 6,);
impl_compose!(0, 1, 2, 3, 4, 5, 6, 7,);
impl_compose!(0, 1, 2, 3, 4, 5, 6, 7, 8,);
impl_compose!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9,);
impl_compose!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10,);
impl_compose!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11,);
