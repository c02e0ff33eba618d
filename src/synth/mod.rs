// Purpose: tone generator state, its synthesis worker and worker lifecycle
// This layer owns every thread the crate spawns

pub mod budget;
pub mod control;
pub mod engine;
pub mod generator;
pub mod launcher;

pub use budget::{BudgetSlot, ThreadBudget};
pub use control::ControlChannel;
pub use generator::Generator;
pub use launcher::Launcher;
