//! Aggregates shown on the dashboard.
//!
//! Everything here is a pure function over collections that are already in
//! memory. `today` is always a calendar date, i.e. the start of the day.

use crate::core::lookup::Lookup;
use crate::domain::model::{Anmeldung, Kurs, PaymentStatus};
use chrono::{DateTime, Datelike, Locale, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

pub const HISTOGRAM_MONTHS: u32 = 6;
pub const RECENT_LIMIT: usize = 5;

/// Started, and not yet ended. Both boundaries are inclusive.
pub fn is_active(kurs: &Kurs, today: NaiveDate) -> bool {
    match kurs.startdatum {
        Some(start) if start <= today => kurs.enddatum.map_or(true, |end| end >= today),
        _ => false,
    }
}

pub fn is_upcoming(kurs: &Kurs, today: NaiveDate) -> bool {
    kurs.startdatum.is_some_and(|start| start > today)
}

pub fn count_active(kurse: &[Kurs], today: NaiveDate) -> usize {
    kurse.iter().filter(|k| is_active(k, today)).count()
}

pub fn count_upcoming(kurse: &[Kurs], today: NaiveDate) -> usize {
    kurse.iter().filter(|k| is_upcoming(k, today)).count()
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PaymentSummary {
    pub paid: usize,
    pub unpaid: usize,
    pub revenue: Decimal,
}

/// Paid and unpaid are counted independently; `Unknown` is in neither.
/// Revenue sums the price of the course behind every paid registration and
/// saturates at the bounds of `Decimal`.
pub fn summarize_payments(anmeldungen: &[Anmeldung], lookup: &Lookup<'_>) -> PaymentSummary {
    anmeldungen
        .iter()
        .fold(PaymentSummary::default(), |mut summary, anmeldung| {
            match anmeldung.bezahlt {
                PaymentStatus::Paid => {
                    summary.paid += 1;
                    let price = lookup
                        .course(anmeldung.kurs.as_ref())
                        .and_then(|k| k.preis)
                        .unwrap_or(Decimal::ZERO);
                    // 超出 Decimal 範圍時停在上限
                    summary.revenue = summary.revenue.saturating_add(price);
                }
                PaymentStatus::Unpaid => summary.unpaid += 1,
                PaymentStatus::Unknown => {}
            }
            summary
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub count: usize,
}

/// (year, month) shifted back by `months`, across year boundaries.
fn months_before(year: i32, month: u32, months: u32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 - months as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

fn month_label(year: i32, month: u32, locale: Locale) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| {
            DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc)
                .format_localized("%b", locale)
                .to_string()
        })
        .unwrap_or_else(|| format!("{:02}", month))
}

/// Registrations per calendar month, oldest first, ending with the month of
/// `today`. Always six buckets; registrations without a date are skipped.
pub fn monthly_histogram(
    anmeldungen: &[Anmeldung],
    today: NaiveDate,
    locale: Locale,
) -> Vec<MonthBucket> {
    (0..HISTOGRAM_MONTHS)
        .rev()
        .map(|back| {
            let (year, month) = months_before(today.year(), today.month(), back);
            let count = anmeldungen
                .iter()
                .filter_map(|a| a.anmeldedatum)
                .filter(|d| d.year() == year && d.month() == month)
                .count();

            MonthBucket {
                year,
                month,
                label: month_label(year, month, locale),
                count,
            }
        })
        .collect()
}

fn registered_at_or_epoch(anmeldung: &Anmeldung) -> NaiveDateTime {
    anmeldung
        .anmeldedatum
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH.naive_utc())
}

/// Newest registrations first; a missing date sorts like the Unix epoch.
pub fn recent_registrations(anmeldungen: &[Anmeldung], limit: usize) -> Vec<&Anmeldung> {
    let mut sorted: Vec<&Anmeldung> = anmeldungen.iter().collect();
    sorted.sort_by_key(|a| std::cmp::Reverse(registered_at_or_epoch(a)));
    sorted.truncate(limit);
    sorted
}
