pub mod dict;
pub mod encoder;
pub mod settings;
pub mod shorten;
