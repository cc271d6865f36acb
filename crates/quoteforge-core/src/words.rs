//! # Number To Words Renderer
//!
//! Renders a currency amount in Indian-English words for the legal line of
//! a quotation.
//!
//! ## Indian Grouping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Western:  12,345,678        Indian:  1,23,45,678                   │
//! │                                                                     │
//! │  First group of 3 digits, then groups of 2:                         │
//! │    1,00,000      = One Lakh                                         │
//! │    1,00,00,000   = One Crore                                        │
//! │    18,255        = Eighteen Thousand Two Hundred Fifty Five         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Crores recurse, so amounts beyond 99 crore ("One Hundred Crore ...")
//! render correctly without further scale words.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{CoreError, CoreResult};
use crate::money::round_currency;

// =============================================================================
// Digit Tables
// =============================================================================

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

// =============================================================================
// Renderer
// =============================================================================

/// Renders a non-negative amount as Indian-English currency words.
///
/// The amount is rounded to 2 decimals first, so paise carry-over
/// (1.999 → 2.00) happens before the rupee/paise split.
///
/// ## Errors
/// `InvalidAmount` on negative input.
///
/// ## Example
/// ```rust
/// use quoteforge_core::words::amount_in_words;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(
///     amount_in_words(dec!(18255.78)).unwrap(),
///     "Eighteen Thousand Two Hundred Fifty Five Rupees and Seventy Eight Paise Only"
/// );
/// ```
pub fn amount_in_words(amount: Decimal) -> CoreResult<String> {
    if amount < Decimal::ZERO {
        return Err(CoreError::InvalidAmount(amount));
    }

    let amount = round_currency(amount);
    let total_paise = (amount * dec!(100))
        .to_u64()
        .ok_or(CoreError::InvalidAmount(amount))?;
    let rupees = total_paise / 100;
    let paise = total_paise % 100;

    let rupee_word = if rupees == 1 { "Rupee" } else { "Rupees" };
    let rupee_part = if rupees == 0 {
        "Zero".to_string()
    } else {
        integer_words(rupees)
    };

    let rendered = if paise > 0 {
        format!(
            "{} {} and {} Paise Only",
            rupee_part,
            rupee_word,
            below_hundred(paise)
        )
    } else {
        format!("{} {} Only", rupee_part, rupee_word)
    };

    Ok(tidy(&rendered))
}

/// Converts a positive integer using Indian grouping.
fn integer_words(n: u64) -> String {
    const CRORE: u64 = 10_000_000;
    const LAKH: u64 = 100_000;
    const THOUSAND: u64 = 1_000;

    if n >= CRORE {
        join(&integer_words(n / CRORE), "Crore", n % CRORE)
    } else if n >= LAKH {
        join(&below_hundred(n / LAKH), "Lakh", n % LAKH)
    } else if n >= THOUSAND {
        join(&below_hundred(n / THOUSAND), "Thousand", n % THOUSAND)
    } else if n >= 100 {
        join(ONES[(n / 100) as usize], "Hundred", n % 100)
    } else {
        below_hundred(n)
    }
}

/// Attaches a scale word and recurses on the remainder.
fn join(head: &str, scale: &str, rest: u64) -> String {
    if rest == 0 {
        format!("{} {}", head, scale)
    } else {
        format!("{} {} {}", head, scale, integer_words(rest))
    }
}

/// 0..=99 via the ones/teens/tens tables (no hyphenation: "Fifty Five").
fn below_hundred(n: u64) -> String {
    debug_assert!(n < 100);
    if n < 20 {
        ONES[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{} {}", TENS[(n / 10) as usize], ONES[(n % 10) as usize])
    }
}

/// Collapses repeated whitespace and capitalizes the first letter.
fn tidy(s: &str) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => collapsed,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
