/// A bus value as delivered by the host simulation on one step.
///
/// The host may report a value as not fully defined while the circuit is
/// still settling (floating or conflicting bits). Such values never raise an
/// error here; consumers treat them as "no update".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Signal {
    /// Every bit is known; the payload holds the bits as an unsigned integer
    Defined(u32),
    /// At least one bit is floating or in error
    #[default]
    Undefined,
}

impl Signal {
    pub const HIGH: Signal = Signal::Defined(1);
    pub const LOW: Signal = Signal::Defined(0);

    pub fn is_fully_defined(self) -> bool {
        matches!(self, Signal::Defined(_))
    }

    /// True only for a defined single-bit high level
    pub fn is_high(self) -> bool {
        self == Signal::HIGH
    }

    /// Integer view of the value, or -1 when not fully defined.
    ///
    /// Mirrors the host engine's convention so that "negative" means
    /// "ignore this update".
    pub fn to_int(self) -> i64 {
        match self {
            Signal::Defined(bits) => bits as i64,
            Signal::Undefined => -1,
        }
    }

    pub fn bits(self) -> Option<u32> {
        match self {
            Signal::Defined(bits) => Some(bits),
            Signal::Undefined => None,
        }
    }
}

impl From<bool> for Signal {
    fn from(level: bool) -> Self {
        if level {
            Signal::HIGH
        } else {
            Signal::LOW
        }
    }
}

impl From<u32> for Signal {
    fn from(bits: u32) -> Self {
        Signal::Defined(bits)
    }
}
