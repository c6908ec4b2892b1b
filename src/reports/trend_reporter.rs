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
use crate::reports::table::Table;
use crate::trend::cash_flow::{DailyExpense, MonthlyCashFlow};
use crate::trend::net_worth::DailyBalance;
use crate::util::amount::fmt_amount;

pub fn net_worth_table(days: &[DailyBalance]) -> Table {
	let mut table = Table::new(6);
	table.right_align(vec![1, 2, 3, 4, 5]);
	table.add_header(vec![
		"Date",
		"Asset change",
		"Liability change",
		"Assets",
		"Liabilities",
		"Net worth",
	]);
	table.add_separator();

	for day in days {
		table.add_row(vec![
			day.date.to_string(),
			fmt_amount(&day.asset_change),
			fmt_amount(&day.liability_change),
			fmt_amount(&day.assets),
			fmt_amount(&day.liabilities),
			fmt_amount(&day.equity),
		]);
	}
	table
}

pub fn cash_flow_table(months: &[MonthlyCashFlow]) -> Table {
	let mut table = Table::new(5);
	table.right_align(vec![1, 2, 3, 4]);
	table.add_header(vec!["Month", "Income", "Expense", "Net", "Year to date"]);
	table.add_separator();

	for month in months {
		table.add_row(vec![
			month.month.clone(),
			fmt_amount(&month.income),
			fmt_amount(&month.expense),
			fmt_amount(&month.net),
			fmt_amount(&month.year_to_date),
		]);
	}
	table
}

pub fn expense_table(expenses: &[DailyExpense]) -> Table {
	let mut table = Table::new(3);
	table.right_align(vec![2]);
	table.add_header(vec!["Date", "Account", "Amount"]);
	table.add_separator();

	for expense in expenses {
		table.add_row(vec![
			expense.date.to_string(),
			expense.account.clone(),
			fmt_amount(&expense.amount),
		]);
	}
	table
}

pub fn years_table(years: &[i32]) -> Table {
	let mut table = Table::new(1);
	table.add_header(vec!["Year"]);
	table.add_separator();
	for year in years {
		table.add_row(vec![year.to_string()]);
	}
	table
}

#[cfg(test)]
mod tests {
	use super::*;
	use rust_decimal::Decimal;

	#[test]
	fn test_cash_flow_table() {
		let months = vec![MonthlyCashFlow {
			month: "2024-01".to_string(),
			income: Decimal::from(1500),
			expense: Decimal::from(200),
			net: Decimal::from(1300),
			year_to_date: Decimal::from(1300),
		}];
		let rendered = cash_flow_table(&months).render();
		let row = rendered.lines().nth(2).unwrap();
		assert!(row.starts_with("2024-01"));
		assert!(row.contains("1,500"));
		assert!(row.ends_with("1,300"));
	}

	#[test]
	fn test_empty_tables() {
		assert!(net_worth_table(&[]).is_empty());
		assert!(years_table(&[]).is_empty());
		assert!(!years_table(&[2024]).is_empty());
	}
}
