//! Standard builtins bound in the global environment

pub mod arithmetic;
pub mod comparison;
pub mod logic;

use crate::tools::ToolRegistry;

/// Register all standard builtins
pub fn register_all(registry: &mut ToolRegistry) {
    arithmetic::register(registry);
    comparison::register(registry);
    logic::register(registry);
}
