//! Process-lifetime registry for the script binding generator.
//!
//! The [`Registry`] is constructed empty, filled by the collection passes,
//! rewritten by post-processing and read by the emitters.

mod comment_index;
mod registry;
mod type_map;

pub use comment_index::{CommentEntry, CommentIndex, OverloadComment, normalize_type};
pub use registry::{PendingExternal, Registry};
pub use type_map::{TypeMap, UserType};
