//! The demo circuit: a lead buzzer on the main bench and a harmony buzzer
//! inside a nested sub-bench, so shutdown has a level to descend into.

use std::collections::HashMap;

use buzzer_tone::{
    circuit::{stop_all, CircuitContext, Component, UnitKind},
    peripheral::{Buzzer, BuzzerInputs, FrequencyUnit},
    synth::{Generator, Launcher},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Lead,
    Harmony,
}

/// Components placed on a bench
pub enum Part {
    Tone(Slot),
    SubBench(Vec<Part>),
    /// Indicator light, no sound
    Led,
}

impl Component for Part {
    fn kind(&self) -> UnitKind<'_, Self> {
        match self {
            Part::Tone(_) => UnitKind::ToneGenerator,
            Part::SubBench(parts) => UnitKind::Composite(Box::new(parts.iter())),
            Part::Led => UnitKind::Other,
        }
    }
}

/// Per-bench instance state
#[derive(Default)]
pub struct BenchState {
    buzzers: HashMap<Slot, Buzzer>,
    sub: Option<Box<BenchState>>,
}

impl CircuitContext<Part> for BenchState {
    fn generator(&self, component: &Part) -> Option<&Generator> {
        match component {
            Part::Tone(slot) => self.buzzers.get(slot).and_then(Buzzer::generator),
            _ => None,
        }
    }

    fn substate(&self, composite: &Part) -> Option<&Self> {
        match composite {
            Part::SubBench(_) => self.sub.as_deref(),
            _ => None,
        }
    }
}

pub struct Bench {
    parts: Vec<Part>,
    state: BenchState,
}

impl Bench {
    pub fn new() -> Self {
        let parts = vec![
            Part::Tone(Slot::Lead),
            Part::Led,
            Part::SubBench(vec![Part::Tone(Slot::Harmony)]),
        ];

        let mut inner = BenchState::default();
        inner.buzzers.insert(Slot::Harmony, Buzzer::default());
        let mut state = BenchState::default();
        state.buzzers.insert(Slot::Lead, Buzzer::default());
        state.sub = Some(Box::new(inner));

        Self { parts, state }
    }

    fn buzzer_mut(&mut self, slot: Slot) -> Option<&mut Buzzer> {
        match slot {
            Slot::Lead => self.state.buzzers.get_mut(&slot),
            Slot::Harmony => self.state.sub.as_mut()?.buzzers.get_mut(&slot),
        }
    }

    pub fn buzzer(&self, slot: Slot) -> Option<&Buzzer> {
        match slot {
            Slot::Lead => self.state.buzzers.get(&slot),
            Slot::Harmony => self.state.sub.as_ref()?.buzzers.get(&slot),
        }
    }

    /// One simulation step for one buzzer
    pub fn step(&mut self, slot: Slot, inputs: &BuzzerInputs, launcher: &Launcher) {
        if let Some(buzzer) = self.buzzer_mut(slot) {
            buzzer.propagate(inputs, launcher);
        }
    }

    /// Switch the FREQ unit of every buzzer, leaving other attributes alone
    pub fn set_frequency_unit(&mut self, unit: FrequencyUnit) {
        for slot in [Slot::Lead, Slot::Harmony] {
            if let Some(buzzer) = self.buzzer_mut(slot) {
                let config = buzzer.config().frequency_unit(unit);
                buzzer.set_config(config);
            }
        }
    }

    /// Stop every generator on the bench, nested ones included
    pub fn stop_all(&self) -> usize {
        self.parts
            .iter()
            .map(|part| stop_all(part, &self.state))
            .sum()
    }

    pub fn is_sounding(&self, slot: Slot) -> bool {
        self.buzzer(slot).is_some_and(Buzzer::is_sounding)
    }
}
