//! Interactive search support

mod debounce;
mod dispatcher;

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use dispatcher::{SearchDispatcher, SearchSnapshot, SearchWatcher};
