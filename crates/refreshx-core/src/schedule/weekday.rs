//! Working-day gate.
//!
//! Weekdays are stored as a Sunday-first bitset (0=Sun ... 6=Sat). English
//! names are only used when converting from and to profile data.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Weekday names in Sunday-first order, matched case-sensitively.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// English name of a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_sunday() as usize]
}

/// Parse an exact English weekday name.
pub fn parse_weekday_name(name: &str) -> Option<Weekday> {
    WEEKDAY_NAMES
        .iter()
        .position(|n| *n == name)
        .map(weekday_from_sunday_index)
}

fn weekday_from_sunday_index(idx: usize) -> Weekday {
    match idx {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

/// Set of configured working days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WorkingDays(u8);

impl WorkingDays {
    pub const NONE: Self = Self(0);

    /// Monday through Friday.
    pub fn weekdays() -> Self {
        [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri]
            .into_iter()
            .collect()
    }

    /// Build from profile weekday names. Unknown names are skipped with a warning;
    /// they could never match a calendar day anyway.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut days = Self::NONE;
        for name in names {
            match parse_weekday_name(name.as_ref()) {
                Some(day) => days.insert(day),
                None => tracing::warn!(name = name.as_ref(), "ignoring unknown weekday name"),
            }
        }
        days
    }

    /// Strict variant of [`WorkingDays::from_names`].
    ///
    /// # Errors
    /// Returns [`ValidationError::UnknownWeekday`] for the first unknown name.
    pub fn try_from_names<I, S>(names: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut days = Self::NONE;
        for name in names {
            let day = parse_weekday_name(name.as_ref())
                .ok_or_else(|| ValidationError::UnknownWeekday(name.as_ref().to_string()))?;
            days.insert(day);
        }
        Ok(days)
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_sunday();
    }

    pub fn remove(&mut self, day: Weekday) {
        self.0 &= !(1 << day.num_days_from_sunday());
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_sunday()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Days in Sunday-first order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        (0..7)
            .map(weekday_from_sunday_index)
            .filter(|d| self.contains(*d))
    }

    /// Names in Sunday-first order.
    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(weekday_name).collect()
    }
}

impl FromIterator<Weekday> for WorkingDays {
    fn from_iter<T: IntoIterator<Item = Weekday>>(iter: T) -> Self {
        let mut days = Self::NONE;
        for d in iter {
            days.insert(d);
        }
        days
    }
}

impl Serialize for WorkingDays {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.names())
    }
}

impl<'de> Deserialize<'de> for WorkingDays {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        Ok(Self::from_names(names))
    }
}

/// Is `date` one of the configured working days?
pub fn is_working_day(working_days: &WorkingDays, date: NaiveDate) -> bool {
    working_days.contains(date.weekday())
}
