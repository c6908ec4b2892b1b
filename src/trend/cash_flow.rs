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
use crate::util::date::Date;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthlyCashFlow {
	/// YYYY-MM
	pub month: String,
	pub income: Decimal,
	pub expense: Decimal,
	pub net: Decimal,

	/// Cumulative net since the start of the month's year
	pub year_to_date: Decimal,
}

#[derive(Default)]
struct MonthTotals {
	income: Decimal,
	expense: Decimal,
}

/// Income, expense and net cash flow per calendar month. Revenue grows on
/// the credit side and expense on the debit side; the opposite side of
/// either reverses it. Months with no revenue or expense activity are
/// absent.
pub fn monthly_cash_flow(
	journal: &FilledJournal,
	chart: &Chart,
	carry_forward: &CarryForwardFilter,
) -> Vec<MonthlyCashFlow> {
	let continuous = carry_forward.apply(journal);
	let mut months: BTreeMap<String, MonthTotals> = BTreeMap::new();

	for row in continuous.rows() {
		let Some(date) = row.date else {
			continue;
		};
		let class_of = |account: &Option<String>| {
			account
				.as_deref()
				.map(|a| chart.classify(a))
				.unwrap_or(AccountClass::Unknown)
		};
		let debit_class = class_of(&row.debit_account);
		let credit_class = class_of(&row.credit_account);

		let touches_pl = [debit_class, credit_class]
			.iter()
			.any(|c| matches!(c, AccountClass::Revenue | AccountClass::Expense));
		if !touches_pl {
			continue;
		}

		let totals = months.entry(date.month_key()).or_default();
		if credit_class == AccountClass::Revenue {
			totals.income += row.credit_amount;
		}
		if debit_class == AccountClass::Revenue {
			totals.income -= row.debit_amount;
		}
		if debit_class == AccountClass::Expense {
			totals.expense += row.debit_amount;
		}
		if credit_class == AccountClass::Expense {
			totals.expense -= row.credit_amount;
		}
	}

	let mut year: Option<String> = None;
	let mut year_to_date = Decimal::ZERO;
	months
		.into_iter()
		.map(|(month, totals)| {
			let month_year = month.get(..4).map(str::to_string);
			if month_year != year {
				year = month_year;
				year_to_date = Decimal::ZERO;
			}
			let net = totals.income - totals.expense;
			year_to_date += net;
			MonthlyCashFlow {
				month,
				income: totals.income,
				expense: totals.expense,
				net,
				year_to_date,
			}
		})
		.collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DailyExpense {
	pub date: Date,
	pub account: String,
	pub amount: Decimal,
}

/// Debit amounts of expense accounts summed per day and account, ordered
/// by date then account name.
pub fn daily_expenses(journal: &FilledJournal, chart: &Chart) -> Vec<DailyExpense> {
	let mut totals: BTreeMap<(Date, String), Decimal> = BTreeMap::new();
	for row in journal.rows() {
		let (Some(date), Some(account)) = (row.date, row.debit_account.as_ref())
		else {
			continue;
		};
		if chart.classify(account) != AccountClass::Expense {
			continue;
		}
		*totals.entry((date, account.clone())).or_default() += row.debit_amount;
	}

	totals
		.into_iter()
		.map(|((date, account), amount)| DailyExpense {
			date,
			account,
			amount,
		})
		.collect()
}
