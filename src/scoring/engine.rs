use tracing::{debug, warn};

use super::rules::{self, parse_amount, Rule};
use crate::receipt::Receipt;

#[derive(Debug, Clone, PartialEq)]
pub struct RuleContribution {
    pub rule: Rule,
    pub points: i64,
    pub description: String, // e.g. "9 alphanumeric characters", "total 30.00"
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointsBreakdown {
    pub contributions: Vec<RuleContribution>,
}

impl PointsBreakdown {
    /// Points contributed by a single rule, zero if it was not evaluated.
    pub fn points_for(&self, rule: Rule) -> i64 {
        self.contributions
            .iter()
            .filter(|c| c.rule == rule)
            .map(|c| c.points)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointsResult {
    pub points: u64,
    /// The total could not be parsed, so no rule was evaluated.
    pub aborted: bool,
    pub breakdown: PointsBreakdown,
}

impl PointsResult {
    fn aborted() -> Self {
        Self {
            points: 0,
            aborted: true,
            breakdown: PointsBreakdown::default(),
        }
    }
}

/// Score a receipt.
///
/// Rules are independent and each one tolerates its own unparsable input by
/// contributing zero. The total is the exception: if it does not parse the
/// whole calculation is abandoned and zero points are returned.
pub fn calculate_points(receipt: &Receipt) -> PointsResult {
    let total = match parse_amount(&receipt.total) {
        Ok(total) => total,
        Err(e) => {
            warn!(total = %receipt.total, error = %e, "unparsable total, scoring aborted");
            return PointsResult::aborted();
        }
    };

    let mut contributions = Vec::with_capacity(Rule::ALL.len());

    let retailer = rules::retailer_points(&receipt.retailer);
    contributions.push(RuleContribution {
        rule: Rule::RetailerName,
        points: retailer,
        description: format!("{} alphanumeric characters in '{}'", retailer, receipt.retailer),
    });

    contributions.push(RuleContribution {
        rule: Rule::RoundDollar,
        points: rules::round_dollar_points(total),
        description: format!("total {}", receipt.total),
    });

    contributions.push(RuleContribution {
        rule: Rule::QuarterMultiple,
        points: rules::quarter_multiple_points(total),
        description: format!("total {}", receipt.total),
    });

    let item_count = receipt.items.len();
    contributions.push(RuleContribution {
        rule: Rule::ItemPairs,
        points: rules::item_pair_points(item_count),
        description: format!("{} items, {} pairs", item_count, item_count / 2),
    });

    let qualifying = receipt
        .items
        .iter()
        .filter(|item| item.short_description.trim().len() % 3 == 0)
        .count();
    let description_total = receipt
        .items
        .iter()
        .fold(0i64, |acc, item| acc.saturating_add(rules::description_points(item)));
    contributions.push(RuleContribution {
        rule: Rule::DescriptionLength,
        points: description_total,
        description: format!("{} of {} descriptions qualify", qualifying, item_count),
    });

    contributions.push(RuleContribution {
        rule: Rule::OddDay,
        points: rules::odd_day_points(&receipt.purchase_date),
        description: format!("purchased on {}", receipt.purchase_date),
    });

    contributions.push(RuleContribution {
        rule: Rule::AfternoonWindow,
        points: rules::afternoon_points(&receipt.purchase_time),
        description: format!("purchased at {}", receipt.purchase_time),
    });

    let sum = contributions
        .iter()
        .fold(0i64, |acc, c| acc.saturating_add(c.points));

    debug!(retailer = %receipt.retailer, points = sum, "receipt scored");

    // Floor at zero
    PointsResult {
        points: sum.max(0) as u64,
        aborted: false,
        breakdown: PointsBreakdown { contributions },
    }
}
