use std::fmt;

/// Closed interval of accepted positional-argument counts.
///
/// Every registered function declares one of these; the interval is checked
/// before the function body ever runs. Construction goes through the named
/// factories so the intent stays readable at registration sites:
///
/// ```rust
/// use bytepat::ParameterCount;
///
/// assert_eq!(ParameterCount::exactly(3).min(), 3);
/// assert_eq!(ParameterCount::exactly(3).max(), 3);
/// assert_eq!(ParameterCount::at_least(2).max(), ParameterCount::UNLIMITED);
/// assert_ne!(ParameterCount::between(2, 5), ParameterCount::at_least(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterCount {
    min: u32,
    max: u32,
}

impl ParameterCount {
    /// Sentinel upper bound meaning "no limit".
    pub const UNLIMITED: u32 = u32::MAX;

    /// Accepts any number of arguments: `[0, UNLIMITED]`.
    pub const fn unlimited() -> ParameterCount {
        ParameterCount {
            min: 0,
            max: ParameterCount::UNLIMITED,
        }
    }

    /// Accepts no arguments at all: `[0, 0]`.
    pub const fn none() -> ParameterCount {
        ParameterCount { min: 0, max: 0 }
    }

    /// Accepts exactly `count` arguments: `[count, count]`.
    pub const fn exactly(count: u32) -> ParameterCount {
        ParameterCount {
            min: count,
            max: count,
        }
    }

    /// Accepts more than `count` arguments: `[count + 1, UNLIMITED]`.
    pub const fn more_than(count: u32) -> ParameterCount {
        ParameterCount {
            min: count.saturating_add(1),
            max: ParameterCount::UNLIMITED,
        }
    }

    /// Accepts fewer than `count` arguments: `[0, max(count - 1, 0)]`.
    pub const fn less_than(count: u32) -> ParameterCount {
        ParameterCount {
            min: 0,
            max: count.saturating_sub(1),
        }
    }

    /// Accepts `count` or more arguments: `[count, UNLIMITED]`.
    pub const fn at_least(count: u32) -> ParameterCount {
        ParameterCount {
            min: count,
            max: ParameterCount::UNLIMITED,
        }
    }

    /// Accepts between `min` and `max` arguments, inclusive on both ends.
    ///
    /// Callers must supply `min <= max`.
    pub const fn between(min: u32, max: u32) -> ParameterCount {
        debug_assert!(min <= max);
        ParameterCount { min, max }
    }

    /// The smallest accepted argument count.
    pub const fn min(&self) -> u32 {
        self.min
    }

    /// The largest accepted argument count, or [`ParameterCount::UNLIMITED`].
    pub const fn max(&self) -> u32 {
        self.max
    }
}

impl fmt::Display for ParameterCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (0, ParameterCount::UNLIMITED) => write!(f, "any number of arguments"),
            (0, 0) => write!(f, "no arguments"),
            (min, max) if min == max => write!(f, "exactly {min}"),
            (min, ParameterCount::UNLIMITED) => write!(f, "at least {min}"),
            (0, max) => write!(f, "at most {max}"),
            (min, max) => write!(f, "between {min} and {max}"),
        }
    }
}
