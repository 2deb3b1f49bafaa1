/// egui drawing code. Everything here reads `AppState` and the active
/// `Theme`; filter changes go back through `AppState` setters.
pub mod charts;
pub mod panels;
pub mod table;
