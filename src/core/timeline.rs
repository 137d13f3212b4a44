pub const MONTHS_PER_YEAR: u32 = 12;

/// A 1-based position on the simulation timeline.
///
/// Month 1 is the first month of year 1. Year 0 is the baseline before any month elapses and has
/// no `MonthIndex`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct MonthIndex {
    global: u32,
}

impl MonthIndex {
    pub fn from_global(global: u32) -> Self {
        debug_assert!(global >= 1, "month index is 1-based");
        Self {
            global: global.max(1),
        }
    }

    pub fn new(year: u32, month_of_year: u32) -> Self {
        debug_assert!(year >= 1 && (1..=MONTHS_PER_YEAR).contains(&month_of_year));
        Self::from_global((year.max(1) - 1) * MONTHS_PER_YEAR + month_of_year.clamp(1, 12))
    }

    pub fn global(self) -> u32 {
        self.global
    }

    pub fn year(self) -> u32 {
        (self.global - 1) / MONTHS_PER_YEAR + 1
    }

    pub fn month_of_year(self) -> u32 {
        (self.global - 1) % MONTHS_PER_YEAR + 1
    }
}

pub fn total_months(years: u32) -> u32 {
    years.saturating_mul(MONTHS_PER_YEAR)
}

/// Months of `year` in chronological order. Empty for year 0.
pub fn months_of_year(year: u32) -> impl Iterator<Item = MonthIndex> {
    let months = if year == 0 { 0 } else { MONTHS_PER_YEAR };
    (1..=months).map(move |month| MonthIndex::new(year, month))
}

/// Every month from 1 through `months`, grouped by the year it falls in.
///
/// The last group is shorter than twelve when `months` is not a whole number of years.
pub fn months_by_year(months: u32) -> Vec<(u32, Vec<MonthIndex>)> {
    let mut groups: Vec<(u32, Vec<MonthIndex>)> = Vec::new();
    for global in 1..=months {
        let index = MonthIndex::from_global(global);
        match groups.last_mut() {
            Some((year, group)) if *year == index.year() => group.push(index),
            _ => groups.push((index.year(), vec![index])),
        }
    }
    groups
}
