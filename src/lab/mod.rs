//! Lab descriptors and the setup-text interpreter

pub mod catalog;
pub mod descriptor;
pub mod interpreter;

pub use catalog::{natural_selection_lab, LabCatalog};
pub use descriptor::{Difficulty, LabPart, LearningGoals, ScienceLab};
pub use interpreter::{interpret_setup, LabDirective, SETUP_RULES};
