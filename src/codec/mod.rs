//! Binary encodings used to derive governance object identities.

pub mod compact_size;
pub mod gobject;

pub use gobject::{encode as encode_gobject, encoded_len, layout, GObject};
