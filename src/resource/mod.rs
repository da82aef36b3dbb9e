pub mod cubemap;
pub mod dds;
pub mod source;
