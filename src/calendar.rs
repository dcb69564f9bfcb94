//! Calendar table and chronological date enumeration.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

/// One test case: a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTuple {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl Ord for DateTuple {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }
}

impl PartialOrd for DateTuple {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DateTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{}", self.day, self.month, self.year)
    }
}

/// Days-per-month for each supported year.
#[derive(Debug, Clone, Default)]
pub struct CalendarTable {
    years: BTreeMap<i32, [u32; 12]>,
}

impl CalendarTable {
    /// The fixed 2020/2021 tables. 2020 is a leap year.
    pub fn reference() -> Self {
        let mut table = Self::default();
        table.insert(2020, [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
        table.insert(2021, [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
        table
    }

    /// Derive month tables from the Gregorian calendar.
    ///
    /// Years outside chrono's representable range are left out of the table.
    pub fn for_years(years: &[i32]) -> Self {
        let mut table = Self::default();
        for &year in years {
            let mut months = [0u32; 12];
            let mut valid = true;
            for (i, slot) in months.iter_mut().enumerate() {
                match days_in_month(year, i as u32 + 1) {
                    Some(days) => *slot = days,
                    None => {
                        valid = false;
                        break;
                    }
                }
            }
            if valid {
                table.insert(year, months);
            }
        }
        table
    }

    /// The reference tables, plus derived tables for any other of `years`.
    pub fn covering(years: &[i32]) -> Self {
        let mut table = Self::reference();
        let missing: Vec<i32> = years.iter().copied().filter(|y| !table.contains(*y)).collect();
        table.years.extend(Self::for_years(&missing).years);
        table
    }

    pub fn insert(&mut self, year: i32, months: [u32; 12]) {
        self.years.insert(year, months);
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years.contains_key(&year)
    }

    /// Day count for `month` (1-12) of `year`, if the year is present.
    pub fn days_in(&self, year: i32, month: u32) -> Option<u32> {
        if !(1..=12).contains(&month) {
            return None;
        }
        self.years.get(&year).map(|m| m[month as usize - 1])
    }
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// Restartable description of the dates to run.
///
/// Each call to [`DateRange::iter`] starts a fresh chronological pass.
#[derive(Debug, Clone)]
pub struct DateRange {
    table: CalendarTable,
    years: Vec<i32>,
    exclude_last_day: bool,
}

impl DateRange {
    /// Years absent from `table` are dropped here and never enumerated.
    pub fn new(table: CalendarTable, years: &[i32], exclude_last_day: bool) -> Self {
        let mut years: Vec<i32> = years.iter().copied().filter(|y| table.contains(*y)).collect();
        years.sort_unstable();
        years.dedup();
        Self {
            table,
            years,
            exclude_last_day,
        }
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn iter(&self) -> DateIter<'_> {
        DateIter {
            range: self,
            year_idx: 0,
            month: 1,
            day: 1,
        }
    }

    /// Last day value emitted for a month.
    fn last_day(&self, year: i32, month: u32) -> u32 {
        let days = self.table.days_in(year, month).unwrap_or(0);
        if self.exclude_last_day {
            days.saturating_sub(1)
        } else {
            days
        }
    }
}

impl<'a> IntoIterator for &'a DateRange {
    type Item = DateTuple;
    type IntoIter = DateIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over a [`DateRange`]: years, then months, then days, ascending.
pub struct DateIter<'a> {
    range: &'a DateRange,
    year_idx: usize,
    month: u32,
    day: u32,
}

impl Iterator for DateIter<'_> {
    type Item = DateTuple;

    fn next(&mut self) -> Option<DateTuple> {
        loop {
            let year = *self.range.years.get(self.year_idx)?;
            if self.month > 12 {
                self.year_idx += 1;
                self.month = 1;
                self.day = 1;
                continue;
            }
            if self.day > self.range.last_day(year, self.month) {
                self.month += 1;
                self.day = 1;
                continue;
            }
            let date = DateTuple {
                day: self.day,
                month: self.month,
                year,
            };
            self.day += 1;
            return Some(date);
        }
    }
}
