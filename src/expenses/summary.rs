use std::collections::HashMap;

use serde::Serialize;

use super::dto::format_date;
use super::repo::Expense;

/// Chart-ready totals: `labels[i]` pairs with `values[i]`, in the order the
/// keys first appear in the input.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Sums amounts per category in a single pass.
pub fn by_category(entries: &[Expense]) -> ChartSeries {
    accumulate(entries.iter().map(|e| (e.category.clone(), e.amount)))
}

/// Sums amounts per calendar date (`YYYY-MM-DD`) in a single pass.
pub fn by_date(entries: &[Expense]) -> ChartSeries {
    accumulate(entries.iter().map(|e| (format_date(e.date), e.amount)))
}

fn accumulate(pairs: impl Iterator<Item = (String, f64)>) -> ChartSeries {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut series = ChartSeries::default();
    for (key, amount) in pairs {
        match slots.get(&key) {
            Some(&i) => series.values[i] += amount,
            None => {
                slots.insert(key.clone(), series.labels.len());
                series.labels.push(key);
                series.values.push(amount);
            }
        }
    }
    series
}
