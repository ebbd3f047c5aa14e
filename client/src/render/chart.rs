use market_lens_core::MarketData;

/// One bar of the "market strength" chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBar {
    pub label: &'static str,
    pub value: u64,
}

pub fn chart_dataset(data: &MarketData) -> Vec<ChartBar> {
    vec![
        ChartBar {
            label: "Target Users",
            value: data.target_users.len() as u64 * 20,
        },
        ChartBar {
            label: "Entry Barriers",
            value: data.entry_barriers.len() as u64 * 25,
        },
        ChartBar {
            label: "Key Features",
            value: data.key_features.len() as u64 * 20,
        },
        ChartBar {
            label: "Market Size",
            value: leading_number(&data.market_size),
        },
    ]
}

/// First run of ASCII digits parsed as an integer, 0 when there is none.
pub fn leading_number(text: &str) -> u64 {
    text.split(|c: char| !c.is_ascii_digit())
        .find(|run| !run.is_empty())
        .and_then(|run| run.parse().ok())
        .unwrap_or(0)
}

/// Horizontal text bars scaled to `width` columns.
pub fn render_chart(bars: &[ChartBar], width: usize) -> String {
    let max = bars.iter().map(|b| b.value).max().unwrap_or(0).max(1);
    bars.iter()
        .map(|b| {
            let filled = (u128::from(b.value) * width as u128 / u128::from(max)) as usize;
            format!("  {:<15} {:<width$} {}", b.label, "#".repeat(filled), b.value)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dataset_weights() {
        let data = MarketData {
            target_users: strings(&["a", "b", "c"]),
            market_size: "$1,200B by 2030".to_string(),
            entry_barriers: strings(&["x", "y"]),
            key_features: strings(&["k"]),
        };
        let values: Vec<u64> = chart_dataset(&data).iter().map(|b| b.value).collect();
        assert_eq!(values, vec![60, 50, 20, 1]);
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("$300 billion"), 300);
        assert_eq!(leading_number("Approx. 45.6B"), 45);
        assert_eq!(leading_number("unknown"), 0);
        assert_eq!(leading_number(""), 0);
    }

    #[test]
    fn test_empty_market_data_is_all_zero() {
        let bars = chart_dataset(&MarketData::default());
        assert!(bars.iter().all(|b| b.value == 0));
        assert_eq!(render_chart(&bars, 10).lines().count(), 4);
    }

    #[test]
    fn test_huge_market_size_scales_without_overflow() {
        let data = MarketData {
            target_users: strings(&["a"]),
            market_size: "$5000000000000000000 total addressable".to_string(),
            entry_barriers: vec![],
            key_features: vec![],
        };
        let bars = chart_dataset(&data);
        assert_eq!(bars[3].value, 5_000_000_000_000_000_000);

        let chart = render_chart(&bars, 40);
        let lines: Vec<&str> = chart.lines().collect();
        assert!(lines[3].contains(&"#".repeat(40)));
        assert!(!lines[0].contains('#'));
    }
}
