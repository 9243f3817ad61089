use crate::config::OutputFormat;
use crate::core::lookup::PLACEHOLDER;
use crate::core::view::DashboardView;
use crate::domain::model::PaymentStatus;
use crate::utils::error::Result;
use rust_decimal::Decimal;
use std::fmt::Display;

/// Shown for every value while the dashboard is loading.
pub const LOADING: &str = "…";

const BAR_WIDTH: usize = 30;

pub fn render(view: &DashboardView, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(view)),
        OutputFormat::Json => render_json(view),
    }
}

pub fn render_json(view: &DashboardView) -> Result<String> {
    Ok(serde_json::to_string_pretty(view)?)
}

fn or_loading<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| LOADING.to_string())
}

fn money(value: Option<Decimal>) -> String {
    value
        .map(|v| format!("{:.2} €", v))
        .unwrap_or_else(|| LOADING.to_string())
}

fn payment_label(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Paid => "bezahlt",
        PaymentStatus::Unpaid => "offen",
        PaymentStatus::Unknown => "unbekannt",
    }
}

/// Renders the dashboard for a terminal.
pub fn render_text(view: &DashboardView) -> String {
    let mut lines = vec![
        format!("🎓 Kurs-Dashboard · Stand {}", view.today.format("%d.%m.%Y")),
        String::new(),
        format!(
            "  Aktive Kurse: {}  |  Kommende Kurse: {}  |  Anmeldungen: {}  |  Umsatz: {}",
            or_loading(view.hero.active_courses),
            or_loading(view.hero.upcoming_courses),
            or_loading(view.hero.registrations),
            money(view.hero.revenue)
        ),
        String::new(),
    ];

    lines.extend(view.kpi_cards.iter().map(|card| {
        format!(
            "  {} {:<12} {:>6}   → {}",
            card.icon,
            card.label,
            or_loading(card.count),
            card.href
        )
    }));
    lines.push(String::new());

    lines.push("📈 Anmeldungen pro Monat".to_string());
    match &view.monthly_registrations {
        Some(buckets) => {
            let max = buckets.iter().map(|b| b.count).max().unwrap_or(0);
            lines.extend(buckets.iter().map(|bucket| {
                let width = if max == 0 {
                    0
                } else {
                    bucket.count * BAR_WIDTH / max
                };
                format!(
                    "  {:<5} │{:<bar$} {}",
                    bucket.label,
                    "█".repeat(width),
                    bucket.count,
                    bar = BAR_WIDTH
                )
            }));
        }
        None => lines.push(format!("  {}", LOADING)),
    }
    lines.push(String::new());

    let payments = view.payments.as_ref();
    lines.push("💶 Zahlungsstatus".to_string());
    lines.push(format!("  Bezahlt: {}", or_loading(payments.map(|p| p.paid))));
    lines.push(format!("  Offen:   {}", or_loading(payments.map(|p| p.unpaid))));
    lines.push(format!("  Umsatz:  {}", money(payments.map(|p| p.revenue))));
    lines.push(String::new());

    lines.push("🕒 Letzte Anmeldungen".to_string());
    match &view.recent_registrations {
        Some(entries) if entries.is_empty() => lines.push("  Keine Anmeldungen".to_string()),
        Some(entries) => lines.extend(entries.iter().map(|entry| {
            let date = entry
                .registered_at
                .map(|d| d.format("%d.%m.%Y").to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            format!(
                "  {}  {} → {} ({})",
                date,
                entry.participant,
                entry.course,
                payment_label(entry.payment)
            )
        })),
        None => lines.push(format!("  {}", LOADING)),
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
