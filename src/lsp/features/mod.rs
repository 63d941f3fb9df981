//! Hover and completion features
//!
//! Each feature is a pure function over the document text plus the shared
//! indexes; the backend handlers only look up state and delegate here.

pub mod completion;
pub mod hover;
pub mod word;

pub use completion::{candidates, completion_items};
pub use hover::hover;
pub use word::{Word, word_at};
