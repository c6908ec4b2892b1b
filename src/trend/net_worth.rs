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
use crate::gl::carry_forward::CarryForwardFilter;
use crate::gl::classification::{AccountClass, Chart};
use crate::gl::journal::FilledJournal;
use crate::gl::ledger::{legs, Side};
use crate::util::date::Date;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Asset and liability positions at the end of one day. Liabilities are
/// reported as a positive amount owed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DailyBalance {
	pub date: Date,
	pub asset_change: Decimal,
	pub liability_change: Decimal,
	pub assets: Decimal,
	pub liabilities: Decimal,

	/// Assets less liabilities
	pub equity: Decimal,
}

/// How a leg moves the asset or liability position, if at all. Assets grow
/// with debits; liabilities grow with credits.
fn position_change(
	class: AccountClass,
	side: Side,
	amount: Decimal,
) -> Option<(AccountClass, Decimal)> {
	match (class, side) {
		(AccountClass::Asset, Side::Debit) => Some((class, amount)),
		(AccountClass::Asset, Side::Credit) => Some((class, -amount)),
		(AccountClass::Liability, Side::Credit) => Some((class, amount)),
		(AccountClass::Liability, Side::Debit) => Some((class, -amount)),
		_ => None,
	}
}

/// Running asset, liability and net-worth balances for every day on which
/// an asset or liability account moved. Intermediate carry-forward entries
/// are removed first so that restated balances are not added again at
/// each period boundary. Undated legs are skipped.
pub fn daily_balances(
	journal: &FilledJournal,
	chart: &Chart,
	carry_forward: &CarryForwardFilter,
) -> Vec<DailyBalance> {
	let continuous = carry_forward.apply(journal);

	// date -> (asset change, liability change)
	let mut changes: BTreeMap<Date, (Decimal, Decimal)> = BTreeMap::new();
	for leg in legs(&continuous) {
		let Some(date) = leg.date else {
			continue;
		};
		let class = chart.classify(&leg.account);
		let Some((class, change)) = position_change(class, leg.side, leg.amount)
		else {
			continue;
		};

		let (assets, liabilities) = changes.entry(date).or_default();
		match class {
			AccountClass::Asset => *assets += change,
			_ => *liabilities += change,
		}
	}

	let mut assets = Decimal::ZERO;
	let mut liabilities = Decimal::ZERO;
	changes
		.into_iter()
		.map(|(date, (asset_change, liability_change))| {
			assets += asset_change;
			liabilities += liability_change;
			DailyBalance {
				date,
				asset_change,
				liability_change,
				assets,
				liabilities,
				equity: assets - liabilities,
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::gl::journal::tests::line;
	use crate::gl::journal::Journal;
	use crate::gl::trial_balance::tests::{
		carry_forward, chart, synthetic_journal, SYNTHETIC_ACCOUNTS,
	};

	fn trend(journal: Journal) -> Vec<DailyBalance> {
		daily_balances(&journal.filled(), &chart(), &carry_forward())
	}

	#[test]
	fn test_running_balances() {
		let days = trend(Journal::new(vec![
			line("2024-01-01", "Opening balance", ("Cash", 1000), ("Capital", 1000)),
			line("2024-01-02", "Card purchase", ("Rent", 300), ("Credit Card", 300)),
			line("2024-01-02", "Sale", ("Cash", 200), ("Sales Revenue", 200)),
			line("2024-01-05", "Pay card", ("Credit Card", 100), ("Cash", 100)),
		]));

		let summary: Vec<(String, Decimal, Decimal, Decimal)> = days
			.iter()
			.map(|d| (d.date.to_string(), d.assets, d.liabilities, d.equity))
			.collect();
		let d = Decimal::from;
		assert_eq!(
			summary,
			vec![
				("2024-01-01".to_string(), d(1000), d(0), d(1000)),
				("2024-01-02".to_string(), d(1200), d(300), d(900)),
				("2024-01-05".to_string(), d(1100), d(200), d(900)),
			]
		);
	}

	#[test]
	fn test_transfers_between_assets_net_out() {
		let days = trend(Journal::new(vec![
			line("2024-01-01", "Opening balance", ("Cash", 1000), ("Capital", 1000)),
			line("2024-01-03", "To savings", ("Savings", 400), ("Cash", 400)),
		]));
		assert_eq!(days.len(), 2);
		assert_eq!(days[1].asset_change, Decimal::ZERO);
		assert_eq!(days[1].assets, Decimal::from(1000));
	}

	#[test]
	fn test_restated_opening_balances_are_not_added_again() {
		let days = trend(Journal::new(vec![
			line("2023-01-01", "Opening balance", ("Cash", 1000), ("Capital", 1000)),
			line("2024-01-01", "Opening balance", ("Cash", 1000), ("Capital", 1000)),
			line("2024-01-02", "Rent", ("Rent", 100), ("Cash", 100)),
		]));
		assert_eq!(days.last().unwrap().assets, Decimal::from(900));
	}

	#[test]
	fn test_each_day_adds_its_delta() {
		for seed in 0..10 {
			let journal = synthetic_journal(seed, 50, &SYNTHETIC_ACCOUNTS);
			let days = trend(journal);

			let mut prev = (Decimal::ZERO, Decimal::ZERO);
			for day in &days {
				assert_eq!(day.assets, prev.0 + day.asset_change);
				assert_eq!(day.liabilities, prev.1 + day.liability_change);
				assert_eq!(day.equity, day.assets - day.liabilities);
				prev = (day.assets, day.liabilities);
			}
			assert!(days.windows(2).all(|w| w[0].date < w[1].date));
		}
	}

	#[test]
	fn test_income_statement_only_days_are_absent() {
		let days = trend(Journal::new(vec![line(
			"2024-01-01",
			"Accrual",
			("Rent", 100),
			("Sales Revenue", 100),
		)]));
		assert!(days.is_empty());
	}
}
