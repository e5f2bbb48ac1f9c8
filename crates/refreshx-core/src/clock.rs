//! Time source used by the planner.
//!
//! A clock carries its timezone, not just the offset in force right now, so
//! history from the other side of a DST change still groups by the correct
//! local day.

use chrono::{DateTime, FixedOffset, Local, TimeZone};

/// Supplies the current time in the user's timezone.
pub trait Clock {
    type Tz: TimeZone;

    fn now(&self) -> DateTime<Self::Tz>;

    /// Zone used for local days and wall-clock times.
    fn timezone(&self) -> Self::Tz {
        self.now().timezone()
    }
}

/// Wall clock in the machine's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn timezone(&self) -> Local {
        Local
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone)]
pub struct FixedClock<Z: TimeZone = FixedOffset>(pub DateTime<Z>);

impl<Z: TimeZone> FixedClock<Z> {
    pub fn new(at: DateTime<Z>) -> Self {
        Self(at)
    }
}

impl<Z: TimeZone> Clock for FixedClock<Z> {
    type Tz = Z;

    fn now(&self) -> DateTime<Z> {
        self.0.clone()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    type Tz = C::Tz;

    fn now(&self) -> DateTime<C::Tz> {
        (**self).now()
    }

    fn timezone(&self) -> C::Tz {
        (**self).timezone()
    }
}
