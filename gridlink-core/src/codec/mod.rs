//! Generic codec combinators for the Gridlink wire protocol.
//!
//! Per-operation codecs are mechanical compositions of the building
//! blocks in this module: fixed-width scalars packed into a frame at
//! known offsets, single-frame primitives (strings, opaque byte blobs),
//! nullable wrappers, begin/end-delimited composites, and the
//! null-compressed fixed-width array used for columnar result pages.
//!
//! Every combinator consumes or produces exactly the frames it owns and
//! leaves the decode cursor positioned immediately after its structure.

pub mod byte_array;
pub mod entry_list;
pub mod error_holder;
pub mod fix_sized;
pub mod list_cn_fixed_size;
pub mod list_fixed_size;
pub mod list_multi_frame;
pub mod map;
pub mod string;
pub mod util;

pub use fix_sized::FixSizedType;
