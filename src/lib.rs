//! Customer churn prediction: form values → fixed feature vector → random-forest verdict.
/// Per-user application directories.
pub mod app_dirs;
/// Load-once classifier and label encoder artifacts.
pub mod artifacts;
/// TOML application settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Form values and the fixed-order feature encoding.
pub mod features;
/// Tracing subscriber setup.
pub mod logging;
/// Inference-side model artifacts.
pub mod ml;
/// Churn prediction over an encoded vector.
pub mod predict;
