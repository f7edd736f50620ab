//! Inference-side machine learning artifacts.
//!
//! Both artifacts are produced by an external training process and exported as JSON;
//! this crate only loads and evaluates them.

pub mod forest;
pub mod label_encoder;
