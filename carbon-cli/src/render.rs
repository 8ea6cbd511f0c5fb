//! Text rendering of results, history rows and charts.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use carbon_core::breakdown::{round_half_up, shares};
use carbon_core::i18n::Translator;
use carbon_core::{CalculationResult, ChartPoint, HistoryEntry, RegionalStats};

/// Width of a 100% bar, in cells.
pub const BAR_WIDTH: usize = 30;

const FULL: char = '█';
const EMPTY: char = '·';

/// Decimal for display: two places at most, no trailing zeros.
pub fn amount(value: Decimal) -> String {
    round_half_up(value).normalize().to_string()
}

/// A bar filled to `percent` of `width`. Out-of-range input is clamped.
pub fn bar(
    percent: Decimal,
    width: usize,
) -> String {
    let clamped = percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let filled = (clamped * Decimal::from(width) / Decimal::ONE_HUNDRED)
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(width);
    let mut out = String::with_capacity(width * FULL.len_utf8());
    out.extend(std::iter::repeat_n(FULL, filled));
    out.extend(std::iter::repeat_n(EMPTY, width - filled));
    out
}

/// Localized category name, or the raw key when no translation exists.
pub fn category_label(
    t: &Translator,
    key: &str,
) -> String {
    let lookup = format!("categories.{key}");
    if t.has(&lookup) { t.t(&lookup) } else { key.to_string() }
}

fn pad(
    label: &str,
    width: usize,
) -> String {
    let used = label.chars().count();
    format!("{label}{}", " ".repeat(width.saturating_sub(used)))
}

/// One bar per category, in descending share order.
pub fn breakdown_lines(
    t: &Translator,
    breakdown: &BTreeMap<String, Decimal>,
) -> Vec<String> {
    let mut rows = shares(breakdown);
    rows.sort_by(|a, b| b.percent.cmp(&a.percent).then_with(|| a.category.cmp(&b.category)));

    let labels: Vec<String> = rows.iter().map(|s| category_label(t, &s.category)).collect();
    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    rows.iter()
        .zip(labels)
        .map(|(share, label)| {
            format!(
                "  {} {} {:>6}%  ({})",
                pad(&label, width),
                bar(share.percent, BAR_WIDTH),
                amount(share.percent),
                t.translate("units.kg", &[("value", &amount(share.value))]),
            )
        })
        .collect()
}

pub fn result_lines(
    t: &Translator,
    result: &CalculationResult,
) -> Vec<String> {
    let mut lines = vec![
        t.t("result.title"),
        t.translate("result.total", &[("total", &amount(result.total))]),
    ];
    lines.extend(breakdown_lines(t, &result.breakdown));

    if let Some(top) = result.dominant_category() {
        lines.push(t.translate("result.top_source", &[("source", &category_label(t, top))]));
    }
    if let Some(suggestion) = result.suggestion.as_deref().filter(|s| !s.trim().is_empty()) {
        lines.push(t.translate("result.suggestion", &[("text", suggestion)]));
    }
    lines
}

/// Bars scaled so the largest point fills the full width.
pub fn chart_lines(points: &[ChartPoint]) -> Vec<String> {
    let max = points
        .iter()
        .map(|p| p.value)
        .max()
        .filter(|m| *m > Decimal::ZERO);
    let width = points.iter().map(|p| p.name.chars().count()).max().unwrap_or(0);

    points
        .iter()
        .map(|p| {
            let percent = max
                .map(|m| p.value * Decimal::ONE_HUNDRED / m)
                .unwrap_or(Decimal::ZERO);
            format!(
                "  {} {} {}",
                pad(&p.name, width),
                bar(percent, BAR_WIDTH),
                amount(p.value)
            )
        })
        .collect()
}

pub fn stats_lines(
    t: &Translator,
    stats: &RegionalStats,
) -> Vec<String> {
    let mut lines = vec![
        t.translate("regional.samples", &[("count", &stats.sample_count.to_string())]),
        t.translate("regional.avg_total", &[("total", &amount(stats.avg_total))]),
        t.translate("regional.top_source", &[("source", &stats.top_source)]),
    ];
    if stats.is_empty() {
        lines.push(t.t("regional.no_data"));
    } else {
        lines.extend(chart_lines(&stats.chart_data));
    }
    lines
}

pub fn history_line(
    t: &Translator,
    entry: &HistoryEntry,
) -> String {
    let when = entry
        .created_at_utc()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .or_else(|| entry.created_at.clone())
        .unwrap_or_else(|| "-".to_string());
    let kind = match entry.log_type.as_deref() {
        Some(kind) if t.has(&format!("history.kinds.{kind}")) => t.t(&format!("history.kinds.{kind}")),
        Some(kind) => kind.to_string(),
        None => "-".to_string(),
    };
    let top = entry
        .breakdown
        .iter()
        .max_by(|a, b| a.1.cmp(b.1))
        .map(|(k, _)| category_label(t, k))
        .unwrap_or_else(|| "-".to_string());

    t.translate(
        "history.row",
        &[
            ("when", &when),
            ("kind", &kind),
            ("total", &amount(entry.total_carbon)),
            ("top", &top),
        ],
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use carbon_core::i18n::Locale;

    use super::*;

    fn en() -> Translator {
        Translator::new(Locale::En)
    }

    fn filled(line: &str) -> usize {
        line.chars().filter(|c| *c == FULL).count()
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar(dec!(50), 10), "█████·····");
        assert_eq!(bar(dec!(0), 4), "····");
        assert_eq!(bar(dec!(100), 4), "████");
    }

    #[test]
    fn bar_clamps_out_of_range_percentages() {
        assert_eq!(bar(dec!(140), 4), "████");
        assert_eq!(bar(dec!(-3), 4), "····");
    }

    #[test]
    fn amounts_drop_trailing_zeros() {
        assert_eq!(amount(dec!(500.00)), "500");
        assert_eq!(amount(dec!(12.345)), "12.35");
        assert_eq!(amount(dec!(0.5)), "0.5");
    }

    #[test]
    fn result_view_shows_total_and_bars() {
        let result = CalculationResult {
            total: dec!(500),
            breakdown: BTreeMap::from([
                ("transport".to_string(), dec!(50)),
                ("diet".to_string(), dec!(200)),
                ("consumption".to_string(), dec!(250)),
            ]),
            top_source: Some("consumption".to_string()),
            suggestion: Some("Buy second-hand.".to_string()),
        };

        let lines = result_lines(&en(), &result);

        assert!(lines[1].contains("500"));
        assert!(lines[2].contains("Consumption") && lines[2].contains("50%"));
        assert!(lines[3].contains("Diet") && lines[3].contains("40%"));
        assert!(lines[4].contains("Transport") && lines[4].contains("10%"));
        assert_eq!(filled(&lines[2]), 15);
        assert_eq!(filled(&lines[3]), 12);
        assert_eq!(filled(&lines[4]), 3);
        assert!(lines.iter().any(|l| l.contains("Buy second-hand.")));
    }

    #[test]
    fn unknown_category_keeps_its_key() {
        assert_eq!(category_label(&en(), "plastics"), "plastics");
        assert_eq!(category_label(&en(), "waste"), "Waste");
    }

    #[test]
    fn chart_scales_to_largest_point() {
        let lines = chart_lines(&[
            ChartPoint {
                name: "交通".to_string(),
                value: dec!(120),
            },
            ChartPoint {
                name: "飲食".to_string(),
                value: dec!(60),
            },
        ]);

        assert_eq!(filled(&lines[0]), BAR_WIDTH);
        assert_eq!(filled(&lines[1]), BAR_WIDTH / 2);
    }

    #[test]
    fn empty_stats_say_so() {
        let stats = RegionalStats {
            top_source: "無資料".to_string(),
            ..RegionalStats::default()
        };

        let lines = stats_lines(&en(), &stats);

        assert!(lines.iter().any(|l| l.contains("無資料")));
        assert_eq!(lines.last(), Some(&en().t("regional.no_data")));
    }

    #[test]
    fn history_row_lists_date_kind_and_total() {
        let entry = HistoryEntry {
            id: Some(1),
            log_type: Some("quick".to_string()),
            total_carbon: dec!(321.5),
            breakdown: BTreeMap::from([("diet".to_string(), dec!(300))]),
            created_at: Some("Tue, 14 Jan 2025 08:30:00 GMT".to_string()),
        };

        let line = history_line(&en(), &entry);

        assert!(line.contains("2025-01-14 08:30"));
        assert!(line.contains("Quick"));
        assert!(line.contains("321.5"));
        assert!(line.contains("Diet"));
    }
}
