//! Common types used across the engine

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month used to filter orders and one-time general costs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "PeriodParts", into = "PeriodParts")]
pub struct ReportingPeriod {
    year: i32,
    month: u32,
}

/// Wire shape of a reporting period
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct PeriodParts {
    year: i32,
    month: u32,
}

impl TryFrom<PeriodParts> for ReportingPeriod {
    type Error = &'static str;

    fn try_from(parts: PeriodParts) -> Result<Self, Self::Error> {
        ReportingPeriod::month(parts.year, parts.month).ok_or("Month must be between 1 and 12")
    }
}

impl From<ReportingPeriod> for PeriodParts {
    fn from(period: ReportingPeriod) -> Self {
        Self {
            year: period.year,
            month: period.month,
        }
    }
}

impl ReportingPeriod {
    /// Build the period for `month` (1-12) of `year`
    pub fn month(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The period a given date falls in
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month_number(&self) -> u32 {
        self.month
    }

    /// Whether `date` falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// First day of the month
    pub fn start(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Last day of the month
    pub fn end(&self) -> Option<NaiveDate> {
        self.start()?
            .checked_add_months(Months::new(1))?
            .pred_opt()
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// `YYYY-MM` label, matching the period keys used in exports
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl std::fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_rejects_out_of_range() {
        assert!(ReportingPeriod::month(2025, 0).is_none());
        assert!(ReportingPeriod::month(2025, 13).is_none());
        assert!(ReportingPeriod::month(2025, 12).is_some());
    }

    #[test]
    fn test_contains() {
        let march = ReportingPeriod::month(2025, 3).unwrap();
        assert!(march.contains(date(2025, 3, 1)));
        assert!(march.contains(date(2025, 3, 31)));
        assert!(!march.contains(date(2025, 4, 1)));
        assert!(!march.contains(date(2024, 3, 15)));
    }

    #[test]
    fn test_bounds() {
        let feb = ReportingPeriod::month(2024, 2).unwrap();
        assert_eq!(feb.start(), Some(date(2024, 2, 1)));
        assert_eq!(feb.end(), Some(date(2024, 2, 29)));

        let dec = ReportingPeriod::month(2025, 12).unwrap();
        assert_eq!(dec.end(), Some(date(2025, 12, 31)));
    }

    #[test]
    fn test_previous_and_next_wrap_years() {
        let jan = ReportingPeriod::month(2025, 1).unwrap();
        assert_eq!(jan.previous(), ReportingPeriod::month(2024, 12).unwrap());
        assert_eq!(jan.previous().next(), jan);
    }

    #[test]
    fn test_label() {
        let period = ReportingPeriod::containing(date(2025, 7, 19));
        assert_eq!(period.label(), "2025-07");
        assert_eq!(period.to_string(), "2025-07");
    }

    #[test]
    fn test_deserialize_validates_month() {
        let ok: ReportingPeriod = serde_json::from_str(r#"{"year":2025,"month":4}"#).unwrap();
        assert_eq!(ok.year(), 2025);
        assert_eq!(ok.month_number(), 4);
        assert!(serde_json::from_str::<ReportingPeriod>(r#"{"year":2025,"month":14}"#).is_err());
    }
}
