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
use crate::gl::classification::{AccountClass, Chart};
use crate::gl::trial_balance::{TrialBalance, TrialBalanceRow};
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;

/// An account's line on a financial statement.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatementRow {
	pub account: String,
	pub class: AccountClass,

	/// Debits minus credits
	pub balance: Decimal,
	pub amount: Decimal,
	pub sort_key: u32,
}

/// Section totals are signed by each class's normal side, so a revenue
/// account holding a debit balance lowers total revenue.
#[derive(Clone, Debug, Default, Serialize)]
pub struct IncomeStatement {
	pub rows: Vec<StatementRow>,
	pub total_revenue: Decimal,
	pub total_expense: Decimal,
	pub net_income: Decimal,

	/// Accounts the chart could not place, shown beside both statements
	pub unclassified: Vec<StatementRow>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct BalanceSheet {
	pub rows: Vec<StatementRow>,
	pub total_assets: Decimal,
	pub total_liabilities: Decimal,
	pub total_equity: Decimal,
	pub unclassified: Vec<StatementRow>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct FinancialStatements {
	pub income_statement: IncomeStatement,
	pub balance_sheet: BalanceSheet,
}

impl FinancialStatements {
	/// Splits a trial balance into its two statements and closes the
	/// period's result into retained earnings, so that the balance sheet
	/// balances without a separate closing entry.
	pub fn compose(
		tb: &TrialBalance,
		chart: &Chart,
		retained_earnings: &str,
	) -> Self {
		if tb.is_empty() {
			return Self::default();
		}

		let to_row = |r: &TrialBalanceRow| {
			StatementRow {
				account: r.account.clone(),
				class: r.class,
				balance: r.balance,
				amount: r.amount,
				sort_key: r.sort_key,
			}
		};

		// Trial balance rows are already sorted, Unknown last
		let unclassified: Vec<StatementRow> = tb
			.rows()
			.iter()
			.filter(|r| r.class == AccountClass::Unknown)
			.map(to_row)
			.collect();
		if !unclassified.is_empty() {
			debug!(
				"statements: {} unclassified account(s) outside the totals",
				unclassified.len()
			);
		}

		let pl_rows: Vec<StatementRow> = tb
			.rows()
			.iter()
			.filter(|r| r.class.is_income_statement())
			.map(to_row)
			.collect();

		// Negative when profitable: revenue carries credit balances
		let pl_balance: Decimal = pl_rows.iter().map(|r| r.balance).sum();

		let income_statement = IncomeStatement {
			total_revenue: total(&pl_rows, AccountClass::Revenue),
			total_expense: total(&pl_rows, AccountClass::Expense),
			net_income: -pl_balance,
			rows: pl_rows,
			unclassified: unclassified.clone(),
		};

		let mut bs_rows: Vec<StatementRow> = tb
			.rows()
			.iter()
			.filter(|r| r.class.is_balance_sheet())
			.map(to_row)
			.collect();

		match bs_rows.iter_mut().find(|r| r.account == retained_earnings) {
			Some(row) => row.balance += pl_balance,
			None => bs_rows.push(StatementRow {
				account: retained_earnings.to_string(),
				class: AccountClass::Equity,
				balance: pl_balance,
				amount: Decimal::ZERO,
				sort_key: chart.sort_key(AccountClass::Equity),
			}),
		}

		for row in bs_rows.iter_mut() {
			row.amount = row.balance.abs();
		}
		bs_rows.sort_by(|a, b| {
			a.sort_key
				.cmp(&b.sort_key)
				.then_with(|| a.account.cmp(&b.account))
		});

		let balance_sheet = BalanceSheet {
			total_assets: total(&bs_rows, AccountClass::Asset),
			total_liabilities: total(&bs_rows, AccountClass::Liability),
			total_equity: total(&bs_rows, AccountClass::Equity),
			rows: bs_rows,
			unclassified,
		};

		Self {
			income_statement,
			balance_sheet,
		}
	}
}

/// Sums a section with its normal side positive. Equals the sum of the
/// rows' absolute amounts unless some row sits on its unusual side.
fn total(rows: &[StatementRow], class: AccountClass) -> Decimal {
	let balance: Decimal = rows
		.iter()
		.filter(|r| r.class == class)
		.map(|r| r.balance)
		.sum();

	match class {
		AccountClass::Asset | AccountClass::Expense => balance,
		// no "-0" in the output
		_ if balance.is_zero() => Decimal::ZERO,
		_ => -balance,
	}
}

/// Headline figures for a period, read off the trial balance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
	/// Assets less liabilities
	pub net_assets: Decimal,
	pub total_assets: Decimal,
	pub total_liabilities: Decimal,
	pub net_income: Decimal,
	pub total_revenue: Decimal,
	pub total_expense: Decimal,
	pub total_debits: Decimal,
	pub total_credits: Decimal,
	pub balanced: bool,
}

impl Summary {
	pub fn from_trial_balance(tb: &TrialBalance) -> Self {
		let total_assets = tb.total_for(AccountClass::Asset);
		let total_liabilities = tb.total_for(AccountClass::Liability);
		let total_revenue = tb.total_for(AccountClass::Revenue);
		let total_expense = tb.total_for(AccountClass::Expense);

		Self {
			net_assets: total_assets - total_liabilities,
			total_assets,
			total_liabilities,
			net_income: total_revenue - total_expense,
			total_revenue,
			total_expense,
			total_debits: tb.total_debits(),
			total_credits: tb.total_credits(),
			balanced: tb.is_balanced(),
		}
	}
}
