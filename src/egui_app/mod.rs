//! egui front end: the customer form and its prediction result.

pub mod controller;
pub mod state;
pub mod ui;
pub mod view_model;
