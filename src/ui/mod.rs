//! Terminal UI: form widgets and shared components

pub mod components;
pub mod forms;
