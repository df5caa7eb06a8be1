pub mod decode;
pub mod payload;
