//! The seven fixed day buckets of the weekly board.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// A day-of-week bucket that a lesson plan is assigned to.
///
/// There are exactly seven buckets; there is no "unassigned" state in the
/// data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

/// Static display metadata for a day bucket.
///
/// A fixed lookup table, not mutable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayInfo {
    /// The day this entry describes.
    pub day: Day,
    /// Human-readable display name ("Monday").
    pub name: &'static str,
    /// Display color as an RGB hex string ("#ff6b6b").
    pub color: &'static str,
}

/// Display metadata for all seven days, in board order (Monday first).
pub const DAYS_OF_WEEK: [DayInfo; 7] = [
    DayInfo {
        day: Day::Monday,
        name: "Monday",
        color: "#ff6b6b",
    },
    DayInfo {
        day: Day::Tuesday,
        name: "Tuesday",
        color: "#4ecdc4",
    },
    DayInfo {
        day: Day::Wednesday,
        name: "Wednesday",
        color: "#45b7d1",
    },
    DayInfo {
        day: Day::Thursday,
        name: "Thursday",
        color: "#96ceb4",
    },
    DayInfo {
        day: Day::Friday,
        name: "Friday",
        color: "#feca57",
    },
    DayInfo {
        day: Day::Saturday,
        name: "Saturday",
        color: "#ff9ff3",
    },
    DayInfo {
        day: Day::Sunday,
        name: "Sunday",
        color: "#54a0ff",
    },
];

impl Day {
    /// All seven days, in board order (Monday first).
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// The lowercase identifier used on the wire and in filenames.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// Display metadata (name and color) for this day.
    #[must_use]
    pub const fn info(self) -> DayInfo {
        match self {
            Self::Monday => DAYS_OF_WEEK[0],
            Self::Tuesday => DAYS_OF_WEEK[1],
            Self::Wednesday => DAYS_OF_WEEK[2],
            Self::Thursday => DAYS_OF_WEEK[3],
            Self::Friday => DAYS_OF_WEEK[4],
            Self::Saturday => DAYS_OF_WEEK[5],
            Self::Sunday => DAYS_OF_WEEK[6],
        }
    }

    /// The calendar date of this day within the week containing `today`.
    ///
    /// The week is Sunday-based: for any `today`, the result lies between
    /// the Sunday on or before `today` and the following Saturday.
    #[must_use]
    pub fn date_in_week_of(self, today: NaiveDate) -> NaiveDate {
        let current = today.weekday().num_days_from_sunday();
        let target = match self {
            Self::Sunday => 0,
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
        };

        if target >= current {
            today + Days::new(u64::from(target - current))
        } else {
            today - Days::new(u64::from(current - target))
        }
    }

    /// Short display form of [`Self::date_in_week_of`], e.g. "Mar 4".
    #[must_use]
    pub fn short_date_in_week_of(self, today: NaiveDate) -> String {
        self.date_in_week_of(today).format("%b %-d").to_string()
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// The string is not one of the seven day identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a day of the week")]
pub struct ParseDayError(String);

impl FromStr for Day {
    type Err = ParseDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "monday" | "mon" => Ok(Self::Monday),
            "tuesday" | "tue" => Ok(Self::Tuesday),
            "wednesday" | "wed" => Ok(Self::Wednesday),
            "thursday" | "thu" => Ok(Self::Thursday),
            "friday" | "fri" => Ok(Self::Friday),
            "saturday" | "sat" => Ok(Self::Saturday),
            "sunday" | "sun" => Ok(Self::Sunday),
            _ => Err(ParseDayError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::NaiveDate;

    use super::{DAYS_OF_WEEK, Day};

    #[test]
    fn roundtrips_through_display_and_from_str() {
        for day in Day::ALL {
            assert_eq!(Day::from_str(&day.to_string()).unwrap(), day);
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Day::Wednesday).unwrap();
        assert_eq!(json, "\"wednesday\"");
        let day: Day = serde_json::from_str("\"friday\"").unwrap();
        assert_eq!(day, Day::Friday);
    }

    #[test]
    fn unknown_day_is_rejected() {
        assert!(Day::from_str("someday").is_err());
    }

    #[test]
    fn info_table_is_aligned() {
        for (day, info) in Day::ALL.iter().zip(DAYS_OF_WEEK) {
            assert_eq!(*day, info.day);
        }
        assert_eq!(Day::Monday.info().color, "#ff6b6b");
        assert_eq!(Day::Sunday.info().name, "Sunday");
    }

    #[test]
    fn dates_resolve_within_sunday_based_week() {
        // 2024-03-06 is a Wednesday.
        let today = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();

        // Sunday on or before today.
        assert_eq!(
            Day::Sunday.date_in_week_of(today),
            NaiveDate::from_ymd_opt(2024, 3, 3).unwrap()
        );
        // Saturday after today.
        assert_eq!(
            Day::Saturday.date_in_week_of(today),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
        // The current day maps to itself.
        assert_eq!(Day::Wednesday.date_in_week_of(today), today);
    }

    #[test]
    fn short_date_formats_without_padding() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        assert_eq!(Day::Monday.short_date_in_week_of(today), "Mar 4");
    }
}
