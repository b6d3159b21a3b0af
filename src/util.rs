//! Internal utilities, not part of the API

pub(crate) mod complex;

// re-exported by crate root
#[doc(hidden)]
pub mod __testing;
