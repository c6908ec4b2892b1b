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
use crate::gl::journal::{FilledJournal, FilledRow};
use anyhow::Error;
use log::debug;
use regex::{Regex, RegexBuilder};

/// Removes the opening-balance entries that each new accounting period
/// repeats from the one before it. A journal spanning several periods
/// would otherwise count every restated balance twice. Only the entries
/// dated on the journal's first day survive, since those are the genuine
/// starting point of the books.
#[derive(Debug, Clone)]
pub struct CarryForwardFilter {
	/// None when no keywords are configured; nothing is then removed.
	pattern: Option<Regex>,
}

impl CarryForwardFilter {
	/// Keywords match anywhere in a description, ignoring case. They are
	/// plain text, not patterns.
	pub fn new(keywords: &[String]) -> Result<Self, Error> {
		let alternatives: Vec<String> = keywords
			.iter()
			.map(|k| k.trim())
			.filter(|k| !k.is_empty())
			.map(regex::escape)
			.collect();

		if alternatives.is_empty() {
			return Ok(Self { pattern: None });
		}

		let pattern = RegexBuilder::new(&alternatives.join("|"))
			.case_insensitive(true)
			.build()?;

		Ok(Self {
			pattern: Some(pattern),
		})
	}

	pub fn is_carry_forward(&self, desc: &str) -> bool {
		self.pattern.as_ref().is_some_and(|p| p.is_match(desc))
	}

	/// Drops each line whose description marks a carry-forward and whose
	/// date is after the earliest date in the journal. Undated lines are
	/// kept. Applying the filter twice changes nothing further.
	pub fn apply(&self, journal: &FilledJournal) -> FilledJournal {
		let Some(start) = journal.min_date() else {
			return journal.clone();
		};

		let is_intermediate = |row: &FilledRow| {
			row.date.is_some_and(|d| d > start) && self.is_carry_forward(&row.desc)
		};

		let rows: Vec<FilledRow> = journal
			.rows()
			.iter()
			.filter(|&row| !is_intermediate(row))
			.cloned()
			.collect();

		debug!(
			"carry-forward: dropped {} of {} lines",
			journal.len() - rows.len(),
			journal.len()
		);

		FilledJournal::from_rows(rows)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::gl::journal::tests::line;
	use crate::gl::journal::Journal;

	fn filter() -> CarryForwardFilter {
		let keywords: Vec<String> = ["opening balance", "前期繰越", "繰越"]
			.iter()
			.map(|s| s.to_string())
			.collect();
		CarryForwardFilter::new(&keywords).unwrap()
	}

	fn two_years() -> Journal {
		Journal::new(vec![
			line("2023-01-01", "Opening balance", ("Cash", 500), ("Capital", 500)),
			line("2023-06-01", "Sale", ("Cash", 100), ("Sales Revenue", 100)),
			line("2024-01-01", "Opening Balance 2024", ("Cash", 600), ("Capital", 600)),
			line("", "", ("Savings", 10), ("Capital", 10)),
			line("2024-02-01", "前期繰越分の調整", ("Rent", 5), ("Cash", 5)),
			line("2024-03-01", "Rent", ("Rent", 50), ("Cash", 50)),
		])
	}

	#[test]
	fn test_keyword_matching() {
		let filter = filter();
		assert!(filter.is_carry_forward("OPENING BALANCE"));
		assert!(filter.is_carry_forward("2024 opening balance (restated)"));
		assert!(filter.is_carry_forward("前月繰越"));
		assert!(!filter.is_carry_forward("Rent"));
		assert!(!filter.is_carry_forward(""));
	}

	#[test]
	fn test_keywords_are_literal() {
		let keywords = vec!["b/f (prior)".to_string()];
		let filter = CarryForwardFilter::new(&keywords).unwrap();
		assert!(filter.is_carry_forward("balance b/f (prior)"));
		assert!(!filter.is_carry_forward("bf prior"));
	}

	#[test]
	fn test_no_keywords_matches_nothing() {
		let filter = CarryForwardFilter::new(&["  ".to_string()]).unwrap();
		assert!(!filter.is_carry_forward("Opening balance"));

		let filled = two_years().filled();
		assert_eq!(filter.apply(&filled), filled);
	}

	#[test]
	fn test_drops_only_later_carry_forwards() {
		let filtered = filter().apply(&two_years().filled());
		let descs: Vec<&str> =
			filtered.rows().iter().map(|r| r.desc.as_str()).collect();

		assert_eq!(descs, vec!["Opening balance", "Sale", "Rent"]);
	}

	#[test]
	fn test_is_idempotent() {
		let filter = filter();
		let once = filter.apply(&two_years().filled());
		let twice = filter.apply(&once);
		assert_eq!(once, twice);
	}

	#[test]
	fn test_first_day_carry_forward_survives_period_extraction() {
		use crate::util::date::Period;

		let period = Period::year(2024).unwrap();
		let extracted = two_years().extract(&period);
		let filtered = filter().apply(&extracted.filled());

		// 2024-01-01 is now the first day, so its opening entry is the
		// true start of the books
		assert_eq!(filtered.len(), 3);
		assert_eq!(filtered.rows()[0].desc, "Opening Balance 2024");
	}
}
