//! Fitting a requested pulse frequency onto a 16-bit hardware timer

use core::fmt;

/// Clock-divider selection feeding a pulse timer unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prescaler {
    Div1,
    Div2,
    Div4,
    Div8,
    Div64,
    Div256,
    Div1024,
}

impl Prescaler {
    /// Divisors in fitting order. The search prefers the smallest divisor,
    /// which gives the finest duty-cycle resolution.
    pub const CASCADE: [Prescaler; 7] = [
        Prescaler::Div1,
        Prescaler::Div2,
        Prescaler::Div4,
        Prescaler::Div8,
        Prescaler::Div64,
        Prescaler::Div256,
        Prescaler::Div1024,
    ];

    /// Decimal divider value
    pub const fn divisor(self) -> u16 {
        match self {
            Prescaler::Div1 => 1,
            Prescaler::Div2 => 2,
            Prescaler::Div4 => 4,
            Prescaler::Div8 => 8,
            Prescaler::Div64 => 64,
            Prescaler::Div256 => 256,
            Prescaler::Div1024 => 1024,
        }
    }
}

impl fmt::Display for Prescaler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.divisor())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Prescaler {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "/{}", self.divisor());
    }
}

/// Concrete timer programming for one pulse period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerParams {
    pub prescaler: Prescaler,
    /// Period in prescaled clock ticks, the timer's compare target
    pub top: u16,
}

impl TimerParams {
    /// The frequency these parameters actually produce
    pub fn real_frequency_hz(self, clock_hz: u32) -> f32 {
        clock_hz as f32 / (self.prescaler.divisor() as u32 * self.top as u32) as f32
    }

    /// Compare value for the requested duty cycle, rounded to the nearest
    /// tick of this period
    pub fn duty_compare(self, duty_cycle_pct: f32) -> u16 {
        (duty_cycle_pct / 100.0 * self.top as f32 + 0.5) as u16
    }
}

/// Fit a target pulse frequency onto a 16-bit timer fed from `clock_hz`.
///
/// Walks [`Prescaler::CASCADE`] in order and accepts the first divisor whose
/// rounded period count is representable in 16 bits. Returns `None` when the
/// target frequency is too low for even the largest divisor.
pub fn fit_frequency(clock_hz: u32, target_hz: f32) -> Option<TimerParams> {
    for prescaler in Prescaler::CASCADE {
        let top = (clock_hz as f32 / (prescaler.divisor() as f32 * target_hz) + 0.5) as u32;
        if (1..=u16::MAX as u32).contains(&top) {
            return Some(TimerParams {
                prescaler,
                top: top as u16,
            });
        }
    }
    None
}
