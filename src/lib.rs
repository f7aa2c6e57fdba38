//! Thread safe reactive state containers for UI-facing application state.
//!
//! A [`Subject`] holds a value and synchronously notifies its observers on
//! every write. Subjects compose: a tuple of subjects (or read-only views,
//! or [`Plain`] pass-through values) can be composed into one subject over
//! their current inner values, staying live-linked to the nested ones. A
//! [`ReadOnlySubject`] exposes reads and subscriptions without mutation, and
//! a [`StateContainer`] bundles one with the actions that drive it.
//!
//! ```
//! use state_containers::{Compose, Subject};
//!
//! let elapsed = Subject::new(0u64);
//! let muted = Subject::new(false);
//! let panel = (&elapsed, &muted).compose();
//!
//! elapsed.set(5);
//! assert_eq!((5, false), panel.value());
//! ```

mod compose;
mod container;
mod read_only;
mod subject;

pub use compose::{Compose, Plain, Source};
pub use container::StateContainer;
pub use read_only::ReadOnlySubject;
pub use subject::{observer, Observer, Subject};
