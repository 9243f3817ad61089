//! View model of the dashboard.
//!
//! Every value is `None` while the data is still loading; renderers show a
//! placeholder for it.

use crate::core::loader::Dashboard;
use crate::core::lookup::Lookup;
use crate::core::stats::{self, MonthBucket, PaymentSummary, RECENT_LIMIT};
use crate::domain::model::{Collections, EntityId, PaymentStatus};
use chrono::{Locale, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub struct ViewOptions {
    pub today: NaiveDate,
    pub locale: Locale,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub label: &'static str,
    pub count: Option<usize>,
    pub href: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroStats {
    pub active_courses: Option<usize>,
    pub upcoming_courses: Option<usize>,
    pub registrations: Option<usize>,
    pub revenue: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentEntry {
    pub id: EntityId,
    pub participant: String,
    pub course: String,
    pub registered_at: Option<NaiveDateTime>,
    pub payment: PaymentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub loading: bool,
    pub today: NaiveDate,
    pub kpi_cards: Vec<KpiCard>,
    pub hero: HeroStats,
    pub monthly_registrations: Option<Vec<MonthBucket>>,
    pub payments: Option<PaymentSummary>,
    pub recent_registrations: Option<Vec<RecentEntry>>,
}

struct CardDef {
    label: &'static str,
    href: &'static str,
    icon: &'static str,
    count: fn(&Collections) -> usize,
}

const CARDS: [CardDef; 5] = [
    CardDef {
        label: "Kurse",
        href: "/kurse",
        icon: "📚",
        count: |c| c.kurse.len(),
    },
    CardDef {
        label: "Teilnehmer",
        href: "/teilnehmer",
        icon: "👥",
        count: |c| c.teilnehmer.len(),
    },
    CardDef {
        label: "Dozenten",
        href: "/dozenten",
        icon: "🎓",
        count: |c| c.dozenten.len(),
    },
    CardDef {
        label: "Räume",
        href: "/raeume",
        icon: "🚪",
        count: |c| c.raeume.len(),
    },
    CardDef {
        label: "Anmeldungen",
        href: "/anmeldungen",
        icon: "📝",
        count: |c| c.anmeldungen.len(),
    },
];

impl DashboardView {
    pub fn build(dashboard: &Dashboard, options: &ViewOptions) -> Self {
        if dashboard.is_loading() {
            return Self::loading(options);
        }

        let data = dashboard.data();
        let today = options.today;
        let lookup = Lookup::new(&data.teilnehmer, &data.kurse);
        let payments = stats::summarize_payments(&data.anmeldungen, &lookup);

        let recent = stats::recent_registrations(&data.anmeldungen, RECENT_LIMIT)
            .into_iter()
            .map(|a| RecentEntry {
                id: a.id.clone(),
                participant: lookup.participant_name(a.teilnehmer.as_ref()).to_string(),
                course: lookup.course_title(a.kurs.as_ref()).to_string(),
                registered_at: a.anmeldedatum,
                payment: a.bezahlt,
            })
            .collect();

        Self {
            loading: false,
            today,
            kpi_cards: CARDS
                .iter()
                .map(|def| KpiCard {
                    label: def.label,
                    count: Some((def.count)(data)),
                    href: def.href,
                    icon: def.icon,
                })
                .collect(),
            hero: HeroStats {
                active_courses: Some(stats::count_active(&data.kurse, today)),
                upcoming_courses: Some(stats::count_upcoming(&data.kurse, today)),
                registrations: Some(data.anmeldungen.len()),
                revenue: Some(payments.revenue),
            },
            monthly_registrations: Some(stats::monthly_histogram(
                &data.anmeldungen,
                today,
                options.locale,
            )),
            payments: Some(payments),
            recent_registrations: Some(recent),
        }
    }

    pub fn loading(options: &ViewOptions) -> Self {
        Self {
            loading: true,
            today: options.today,
            kpi_cards: CARDS
                .iter()
                .map(|def| KpiCard {
                    label: def.label,
                    count: None,
                    href: def.href,
                    icon: def.icon,
                })
                .collect(),
            hero: HeroStats {
                active_courses: None,
                upcoming_courses: None,
                registrations: None,
                revenue: None,
            },
            monthly_registrations: None,
            payments: None,
            recent_registrations: None,
        }
    }
}
