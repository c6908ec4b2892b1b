/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a money cell. Thousands separators, surrounding whitespace and a
/// leading currency sign are tolerated since spreadsheets export amounts
/// with display formatting applied. Returns None for blank cells, for
/// text that is not a number and for negative numbers, since the debit
/// and credit columns carry magnitudes only.
pub fn parse_amount(cell: &str) -> Option<Decimal> {
	let cleaned: String = cell
		.trim()
		.trim_start_matches(&['¥', '$', '€', '£', '￥'][..])
		.chars()
		.filter(|c| *c != ',' && !c.is_whitespace())
		.collect();

	if cleaned.is_empty() {
		return None;
	}

	Decimal::from_str(&cleaned)
		.or_else(|_| Decimal::from_scientific(&cleaned))
		.ok()
		.filter(|amount| !amount.is_sign_negative() || amount.is_zero())
}

/// Renders an amount with thousands separators, keeping whatever decimal
/// places the value carries (trailing zeros are dropped).
pub fn fmt_amount(amount: &Decimal) -> String {
	let normalized = amount.normalize();
	let rendered = normalized.abs().to_string();

	let (int_part, frac_part) = match rendered.split_once('.') {
		Some((i, f)) => (i.to_string(), Some(f.to_string())),
		None => (rendered, None),
	};

	let mut int_str = int_part;
	let mut i = int_str.len() as isize - 3;
	while i > 0 {
		int_str.insert(i as usize, ',');
		i -= 3;
	}

	let formatted = match frac_part {
		Some(f) => format!("{}.{}", int_str, f),
		None => int_str,
	};

	if normalized.is_sign_negative() && !normalized.is_zero() {
		format!("-{}", formatted)
	} else {
		formatted
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_amount() {
		assert_eq!(parse_amount("1000"), Some(Decimal::from(1000)));
		assert_eq!(parse_amount(" 1,234,567 "), Some(Decimal::from(1234567)));
		assert_eq!(parse_amount("¥3,000"), Some(Decimal::from(3000)));
		assert_eq!(parse_amount("12.50"), Decimal::from_str("12.5").ok());
		assert_eq!(parse_amount(""), None);
		assert_eq!(parse_amount("   "), None);
		assert_eq!(parse_amount("twelve"), None);
		assert_eq!(parse_amount("-500"), None);
		assert_eq!(parse_amount("$-1,200"), None);
		assert_eq!(parse_amount("-0"), Some(Decimal::ZERO));
	}

	#[test]
	fn test_fmt_amount() {
		assert_eq!(fmt_amount(&Decimal::from(0)), "0");
		assert_eq!(fmt_amount(&Decimal::from(999)), "999");
		assert_eq!(fmt_amount(&Decimal::from(1000)), "1,000");
		assert_eq!(fmt_amount(&Decimal::from(-1234567)), "-1,234,567");
		assert_eq!(
			fmt_amount(&Decimal::from_str("1234.50").unwrap()),
			"1,234.5"
		);
	}
}
