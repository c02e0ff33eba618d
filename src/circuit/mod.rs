// Purpose: walk a host's composite structure without knowing its internals

pub mod shutdown;

pub use shutdown::{stop_all, CircuitContext, Component, UnitKind};
