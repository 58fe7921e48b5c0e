//! Table-driven executors: size computation, packing, unpacking and skipping
//! of unknown fields. All of them walk a `Value` tree against the compiled
//! `Program` of its record.
pub mod pack;
pub mod size;
pub mod skip;
pub mod unpack;

pub use pack::pack_message;
pub use size::message_size;
pub use skip::skip_field;
pub use unpack::unpack_message;
