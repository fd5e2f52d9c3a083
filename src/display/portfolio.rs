//! Holdings, alerts and quote formatting for the investment tracker

use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use super::number::format_currency;
use crate::config::settings::Settings;
use crate::models::{Holding, PortfolioStats, PriceAlert, Quote};

#[derive(Tabled)]
struct HoldingLine {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Avg Price")]
    avg_price: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "P/L")]
    profit: String,
}

pub fn format_holdings(holdings: &[Holding], quotes: &[Quote], settings: &Settings) -> String {
    if holdings.is_empty() {
        return "No holdings.".to_string();
    }

    let money = |v: f64| format_currency(v, &settings.currency_symbol, &settings.number_format);
    let lines = holdings.iter().map(|h| {
        let quote = quotes.iter().find(|q| q.matches(&h.symbol, h.kind));
        HoldingLine {
            id: h.id.to_string(),
            symbol: h.symbol.clone(),
            kind: h.kind.to_string(),
            quantity: h.quantity.to_string(),
            avg_price: money(h.avg_price),
            value: quote.map_or_else(|| "-".into(), |q| money(q.price * h.quantity)),
            profit: quote.map_or_else(
                || "-".into(),
                |q| money((q.price - h.avg_price) * h.quantity),
            ),
        }
    });

    Table::new(lines)
        .with(Style::psql())
        .modify(Columns::new(3..), Alignment::right())
        .to_string()
}

pub fn format_portfolio_stats(stats: &PortfolioStats, settings: &Settings) -> String {
    let money = |v: f64| format_currency(v, &settings.currency_symbol, &settings.number_format);
    let mut out = format!(
        "Total value:  {}\nToday:        {}\nUnrealized:   {}",
        money(stats.total_value),
        money(stats.daily_change),
        money(stats.unrealized_gain()),
    );
    if stats.unpriced > 0 {
        out.push_str(&format!("\n({} holding(s) without a quote)", stats.unpriced));
    }
    out
}

pub fn format_alerts(alerts: &[PriceAlert]) -> String {
    if alerts.is_empty() {
        return "No price alerts.".to_string();
    }
    alerts
        .iter()
        .map(|a| {
            format!(
                "{}  {} {} ${}{}",
                a.id,
                a.symbol,
                a.direction,
                a.price,
                if a.active { "" } else { "  (inactive)" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_quote(quote: &Quote) -> String {
    format!(
        "{:<10} {:>12.2} {:>+10.2} {:>+8.2}%",
        quote.symbol, quote.price, quote.change, quote.change_percent
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertDirection, AssetKind};

    fn quote() -> Quote {
        Quote {
            symbol: "AAPL".into(),
            kind: AssetKind::Stock,
            price: 200.0,
            change: -2.5,
            change_percent: -1.23,
            high: None,
            low: None,
            prev_close: Some(202.5),
        }
    }

    #[test]
    fn test_format_holdings() {
        let holdings = vec![Holding::new("AAPL", 10.0, 150.0, AssetKind::Stock).unwrap()];
        let text = format_holdings(&holdings, &[quote()], &Settings::default());
        assert!(text.contains("$2,000.00"));
        assert!(text.contains("$500.00"));

        let unpriced = format_holdings(&holdings, &[], &Settings::default());
        assert!(unpriced.contains('-'));
        assert_eq!(format_holdings(&[], &[], &Settings::default()), "No holdings.");
    }

    #[test]
    fn test_format_alerts() {
        let alert = PriceAlert::new("AAPL", AlertDirection::Above, 180.0).unwrap();
        let text = format_alerts(&[alert]);
        assert!(text.contains("AAPL above $180"));
    }

    #[test]
    fn test_format_quote() {
        let text = format_quote(&quote());
        assert!(text.contains("200.00"));
        assert!(text.contains("-2.50"));
        assert!(text.contains("-1.23%"));
    }
}
