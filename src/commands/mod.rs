pub mod annotate;
pub mod expand;
pub mod validate;
