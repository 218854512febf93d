//! arthra-storage
//!
//! Patient record persistence. The [`store::PatientStore`] trait is the only
//! surface the scoring and report pipeline depends on; [`memory::MemoryStore`]
//! and [`s3::S3Store`] implement it. The `objects`/`state` modules are thin
//! wrappers around the AWS S3 SDK.

pub mod client;
pub mod error;
pub mod memory;
pub mod objects;
pub mod s3;
pub mod state;
pub mod store;

pub use memory::MemoryStore;
pub use s3::S3Store;
pub use store::PatientStore;
