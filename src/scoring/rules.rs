use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::receipt::Item;

pub const RETAILER_CHAR_POINTS: i64 = 1;
pub const ROUND_DOLLAR_POINTS: i64 = 50;
pub const QUARTER_MULTIPLE_POINTS: i64 = 25;
pub const ITEM_PAIR_POINTS: i64 = 5;
pub const ODD_DAY_POINTS: i64 = 6;
pub const AFTERNOON_POINTS: i64 = 10;

/// Afternoon window as a half-open hour range: 14:00 up to but excluding 16:00.
const AFTERNOON_START_HOUR: u32 = 14;
const AFTERNOON_END_HOUR: u32 = 16;

/// The independent rules that make up a receipt's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    RetailerName,
    RoundDollar,
    QuarterMultiple,
    ItemPairs,
    DescriptionLength,
    OddDay,
    AfternoonWindow,
}

impl Rule {
    pub const ALL: [Rule; 7] = [
        Rule::RetailerName,
        Rule::RoundDollar,
        Rule::QuarterMultiple,
        Rule::ItemPairs,
        Rule::DescriptionLength,
        Rule::OddDay,
        Rule::AfternoonWindow,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Rule::RetailerName => "Retailer name",
            Rule::RoundDollar => "Round dollar",
            Rule::QuarterMultiple => "Quarter multiple",
            Rule::ItemPairs => "Item pairs",
            Rule::DescriptionLength => "Description length",
            Rule::OddDay => "Odd day",
            Rule::AfternoonWindow => "Afternoon window",
        }
    }
}

/// Parse a decimal amount such as "35.35", "-10" or "1e3". Digit separators
/// ("1_000") are not accepted.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    if s.contains('_') {
        bail!("Invalid amount: '{}'", s);
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .with_context(|| format!("Invalid amount: '{}'", s))
}

/// True when `s` matches `pattern` byte for byte, with `9` standing for any
/// ASCII digit.
fn matches_shape(s: &str, pattern: &str) -> bool {
    s.len() == pattern.len()
        && s.bytes().zip(pattern.bytes()).all(|(c, p)| {
            if p == b'9' {
                c.is_ascii_digit()
            } else {
                c == p
            }
        })
}

/// Parse a purchase date in exactly "YYYY-MM-DD" form.
pub fn parse_purchase_date(s: &str) -> Result<NaiveDate> {
    if !matches_shape(s, "9999-99-99") {
        bail!("Invalid purchase date: '{}'", s);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid purchase date: '{}'", s))
}

/// Parse a purchase time in 24h "HH:MM" form. A single-digit hour ("9:30")
/// is accepted; the minutes always take two digits.
pub fn parse_purchase_time(s: &str) -> Result<NaiveTime> {
    if !matches_shape(s, "99:99") && !matches_shape(s, "9:99") {
        bail!("Invalid purchase time: '{}'", s);
    }
    NaiveTime::parse_from_str(s, "%H:%M")
        .with_context(|| format!("Invalid purchase time: '{}'", s))
}

/// Letters (L*) and numbers (N*) by Unicode general category. Combining marks
/// do not count even where they are alphabetic.
fn is_letter_or_number(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber
    )
}

/// One point per letter or digit in the retailer name.
pub fn retailer_points(retailer: &str) -> i64 {
    let count = retailer.chars().filter(|&c| is_letter_or_number(c)).count();
    (count as i64).saturating_mul(RETAILER_CHAR_POINTS)
}

pub fn round_dollar_points(total: Decimal) -> i64 {
    if total.fract().is_zero() {
        ROUND_DOLLAR_POINTS
    } else {
        0
    }
}

/// Fires for every round-dollar total as well; both bonuses stack.
pub fn quarter_multiple_points(total: Decimal) -> i64 {
    if (total % Decimal::new(25, 2)).is_zero() {
        QUARTER_MULTIPLE_POINTS
    } else {
        0
    }
}

pub fn item_pair_points(item_count: usize) -> i64 {
    ((item_count / 2) as i64).saturating_mul(ITEM_PAIR_POINTS)
}

/// `ceil(price * 0.2)` when the trimmed description length (in bytes) is a
/// multiple of three, zero otherwise. An unparsable price contributes zero.
pub fn description_points(item: &Item) -> i64 {
    if item.short_description.trim().len() % 3 != 0 {
        return 0;
    }

    match parse_amount(&item.price) {
        Ok(price) => {
            let points = (price * Decimal::new(2, 1)).ceil();
            points.to_i64().unwrap_or(if points.is_sign_negative() {
                i64::MIN
            } else {
                i64::MAX
            })
        }
        Err(_) => 0,
    }
}

/// Six points when the day of month is odd. An unparsable date contributes zero.
pub fn odd_day_points(purchase_date: &str) -> i64 {
    match parse_purchase_date(purchase_date) {
        Ok(date) if date.day() % 2 == 1 => ODD_DAY_POINTS,
        _ => 0,
    }
}

/// Ten points for a purchase hour in [14, 16). An unparsable time contributes zero.
pub fn afternoon_points(purchase_time: &str) -> i64 {
    match parse_purchase_time(purchase_time) {
        Ok(time) if (AFTERNOON_START_HOUR..AFTERNOON_END_HOUR).contains(&time.hour()) => {
            AFTERNOON_POINTS
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(s: &str) -> Decimal {
        parse_amount(s).unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(amount("35.35"), Decimal::new(3535, 2));
        assert_eq!(amount("-10"), Decimal::new(-10, 0));
        assert!(parse_amount("").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("12.3.4").is_err());
    }

    #[test]
    fn test_parse_amount_exponent_and_separators() {
        assert_eq!(amount("1e3"), Decimal::new(1000, 0));
        assert!(parse_amount("1_000").is_err());
        assert!(parse_amount("1_000.00").is_err());
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("Inf").is_err());
    }

    #[test]
    fn test_parse_purchase_date() {
        let date = parse_purchase_date("2022-03-20").unwrap();
        assert_eq!(date.day(), 20);
        assert!(parse_purchase_date("2022-02-30").is_err());
        assert!(parse_purchase_date("03/20/2022").is_err());
        assert!(parse_purchase_date("").is_err());
    }

    #[test]
    fn test_parse_purchase_date_rejects_loose_shapes() {
        for input in ["2022-1-1", "2022-01-1", "2022-1-01", "22-01-01", "+2022-01-01", " 2022-01-01"] {
            assert!(parse_purchase_date(input).is_err(), "accepted {:?}", input);
            assert_eq!(odd_day_points(input), 0, "scored {:?}", input);
        }
    }

    #[test]
    fn test_parse_purchase_time() {
        let time = parse_purchase_time("14:33").unwrap();
        assert_eq!(time.hour(), 14);
        assert_eq!(time.minute(), 33);
        assert!(parse_purchase_time("25:00").is_err());
        assert!(parse_purchase_time("2pm").is_err());
    }

    #[test]
    fn test_parse_purchase_time_shapes() {
        let time = parse_purchase_time("9:30").unwrap();
        assert_eq!(time.hour(), 9);
        assert_eq!(time.minute(), 30);

        for input in ["14:5", "014:30", "14:30:00", "14-30", " 14:30"] {
            assert!(parse_purchase_time(input).is_err(), "accepted {:?}", input);
            assert_eq!(afternoon_points(input), 0, "scored {:?}", input);
        }
    }

    #[test]
    fn test_retailer_counts_letters_and_digits_only() {
        assert_eq!(retailer_points("Target"), 6);
        assert_eq!(retailer_points("M&M Corner Market"), 14);
        assert_eq!(retailer_points("7-Eleven"), 7);
        assert_eq!(retailer_points("& - !"), 0);
        assert_eq!(retailer_points(""), 0);
    }

    #[test]
    fn test_retailer_uses_letter_and_number_categories() {
        assert_eq!(retailer_points("Café 24"), 6);
        assert_eq!(retailer_points("\u{0915}"), 1);
        // Vowel sign AA is alphabetic but a combining mark.
        assert_eq!(retailer_points("\u{093E}"), 0);
        assert_eq!(retailer_points("\u{0915}\u{093E}"), 1);
        assert_eq!(retailer_points("½"), 1);
    }

    #[test]
    fn test_round_dollar() {
        assert_eq!(round_dollar_points(amount("10.00")), ROUND_DOLLAR_POINTS);
        assert_eq!(round_dollar_points(amount("10")), ROUND_DOLLAR_POINTS);
        assert_eq!(round_dollar_points(amount("10.01")), 0);
        assert_eq!(round_dollar_points(amount("9.99")), 0);
    }

    #[test]
    fn test_quarter_multiple() {
        assert_eq!(quarter_multiple_points(amount("9.25")), QUARTER_MULTIPLE_POINTS);
        assert_eq!(quarter_multiple_points(amount("9.75")), QUARTER_MULTIPLE_POINTS);
        assert_eq!(quarter_multiple_points(amount("10.00")), QUARTER_MULTIPLE_POINTS);
        assert_eq!(quarter_multiple_points(amount("9.30")), 0);
        assert_eq!(quarter_multiple_points(amount("35.35")), 0);
    }

    #[test]
    fn test_item_pairs_floor() {
        assert_eq!(item_pair_points(0), 0);
        assert_eq!(item_pair_points(1), 0);
        assert_eq!(item_pair_points(2), 5);
        assert_eq!(item_pair_points(3), 5);
        assert_eq!(item_pair_points(5), 10);
    }

    #[test]
    fn test_description_length_multiple_of_three() {
        // "Emils Cheese Pizza" is 18 chars: ceil(12.25 * 0.2) = ceil(2.45) = 3
        assert_eq!(description_points(&Item::new("Emils Cheese Pizza", "12.25")), 3);
        // Surrounding whitespace is trimmed: "Klarbrunn 12-PK 12 FL OZ" is 24 chars
        assert_eq!(
            description_points(&Item::new("   Klarbrunn 12-PK 12 FL OZ  ", "12.00")),
            3
        );
        assert_eq!(description_points(&Item::new("Gatorade", "2.25")), 0);
    }

    #[test]
    fn test_description_empty_after_trim_counts() {
        assert_eq!(description_points(&Item::new("   ", "10.00")), 2);
    }

    #[test]
    fn test_description_bad_price_contributes_zero() {
        assert_eq!(description_points(&Item::new("abc", "free")), 0);
        assert_eq!(description_points(&Item::new("abc", "")), 0);
    }

    #[test]
    fn test_odd_day() {
        assert_eq!(odd_day_points("2022-01-01"), ODD_DAY_POINTS);
        assert_eq!(odd_day_points("2022-01-31"), ODD_DAY_POINTS);
        assert_eq!(odd_day_points("2022-01-02"), 0);
        assert_eq!(odd_day_points("not a date"), 0);
    }

    #[test]
    fn test_afternoon_window_is_half_open() {
        assert_eq!(afternoon_points("13:59"), 0);
        assert_eq!(afternoon_points("14:00"), AFTERNOON_POINTS);
        assert_eq!(afternoon_points("15:59"), AFTERNOON_POINTS);
        assert_eq!(afternoon_points("16:00"), 0);
        assert_eq!(afternoon_points(""), 0);
    }

    #[test]
    fn test_rule_labels_are_distinct() {
        let mut labels: Vec<_> = Rule::ALL.iter().map(|r| r.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), Rule::ALL.len());
    }
}
