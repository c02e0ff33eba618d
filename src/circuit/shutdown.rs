//! Cascading shutdown of every tone generator below a component.

/*
Nested Circuits
===============

A circuit holds components; some of them are tone generators, some are
subcircuits that hold components of their own, to any depth:

    root
    ├── buzzer A
    ├── gate
    └── sub 1
        ├── buzzer B
        └── sub 2
            └── buzzer C

Generator state does not live in the components. Each level of nesting has
its own context (the host's per-instance state store), and the host knows how
to go from a subcircuit component to the context of the circuit inside it.

The walker only needs two capabilities from the host, expressed as traits:

    Component        is this a generator, a composite (and its children), or neither?
    CircuitContext   the generator state of a component at this level, and the
                     nested context of a composite

Containment is a tree, so there is no cycle detection. Sibling order is
whatever the host's iterator yields.
*/

use tracing::trace;

use crate::synth::Generator;

/// What a component is, as far as shutdown is concerned
pub enum UnitKind<'a, C> {
    /// Owns a generator in its circuit's context
    ToneGenerator,
    /// Contains further components, resolved against a nested context
    Composite(Box<dyn Iterator<Item = &'a C> + 'a>),
    /// Anything else: ignored
    Other,
}

/// Host component as seen by the walker
pub trait Component: Sized {
    fn kind(&self) -> UnitKind<'_, Self>;
}

/// Host per-circuit state store as seen by the walker
pub trait CircuitContext<C> {
    /// Generator state of `component` at this level, if it has any yet
    fn generator(&self, component: &C) -> Option<&Generator>;

    /// Context of the circuit nested inside `composite`
    fn substate(&self, composite: &C) -> Option<&Self>;
}

/// Stop every running generator reachable from `component`.
///
/// Returns how many workers were asked to stop. Like `Generator::stop` this
/// does not wait for them to exit.
pub fn stop_all<C, S>(component: &C, context: &S) -> usize
where
    C: Component,
    S: CircuitContext<C> + ?Sized,
{
    match component.kind() {
        UnitKind::ToneGenerator => match context.generator(component) {
            Some(generator) if generator.is_running() => {
                generator.stop();
                1
            }
            _ => 0,
        },
        UnitKind::Composite(children) => {
            let Some(inner) = context.substate(component) else {
                trace!("composite without nested state, nothing to stop");
                return 0;
            };
            children.map(|child| stop_all(child, inner)).sum()
        }
        UnitKind::Other => 0,
    }
}
