//! Domain types and HTML rendering for the label viewer.
//!
//! Nothing in this crate performs I/O: the upload layer produces an
//! [`upload::UploadedImage`], the label detector produces a [`label::LabelSet`],
//! and [`render`] turns both into markup.

pub mod label;
pub mod render;
pub mod upload;
