mod client;
mod source;

pub use client::CmsClient;
pub use source::DocumentSource;
