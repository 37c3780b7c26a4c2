pub mod buffer;
pub mod cipher;
pub mod collection;
pub mod config;
pub mod counters;
pub mod pipeline;
pub mod rle;
pub mod text;

pub use buffer::{BufferError, ByteBuffer, length};
pub use cipher::{caesar_decode, caesar_encode};
pub use collection::{CollectionError, StringCollection};
pub use config::StrbufConfig;
pub use counters::{UsageCounters, UsageSnapshot};
pub use pipeline::{Pipeline, PipelineError, Transform, TransformStep};
pub use rle::RleError;
pub use text::{
    NOT_FOUND, ReplaceError, ReplacePolicy, capitalize, compare, compare_optional, concatenate, concatenate_optional,
    find, find_index, find_optional, replace_all, reverse, split, substring, to_lower, to_upper, trim, trim_optional,
};
