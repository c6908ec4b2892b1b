/* Copyright © 2024-2025 Adam Train <adam@adamtrain.net>
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
use crate::gl::classification::AccountClass;
use crate::gl::statements::{
	BalanceSheet, FinancialStatements, IncomeStatement, StatementRow, Summary,
};
use crate::gl::trial_balance::TrialBalance;
use crate::reports::table::Table;
use crate::util::amount::fmt_amount;
use rust_decimal::Decimal;

/// Renders the trial balance and the statements derived from it. Build it
/// from the computed views, then print whichever report was asked for.
pub struct StatementReporter<'a> {
	tb: &'a TrialBalance,
}

impl<'a> StatementReporter<'a> {
	pub fn new(tb: &'a TrialBalance) -> Self {
		Self { tb }
	}

	// ------------
	// -- TABLES --
	// ------------

	/// One line per account with its debit and credit totals, followed by
	/// the column totals. Unbalanced books are flagged on the total line.
	pub fn trial_balance_table(&self) -> Table {
		let mut table = Table::new(6);
		table.right_align(vec![2, 3, 4]);
		table.add_header(vec![
			"Account", "Class", "Debit", "Credit", "Balance", "Side",
		]);
		table.add_separator();

		for row in self.tb.rows() {
			table.add_row(vec![
				row.account.clone(),
				row.class.to_string(),
				fmt_amount(&row.debit),
				fmt_amount(&row.credit),
				fmt_amount(&row.amount),
				row.side.to_string(),
			]);
		}

		table.add_partial_separator(vec![2, 3]);
		let check = if self.tb.is_balanced() { "" } else { "UNBALANCED" };
		table.add_row(vec![
			"Total".to_string(),
			String::new(),
			fmt_amount(&self.tb.total_debits()),
			fmt_amount(&self.tb.total_credits()),
			String::new(),
			check.to_string(),
		]);
		table
	}

	pub fn income_statement_table(is: &IncomeStatement) -> Table {
		let mut table = Table::new(3);
		table.right_align(vec![2]);
		table.add_header(vec!["Account", "Class", "Amount"]);
		table.add_separator();
		add_statement_rows(&mut table, &is.rows);

		table.add_partial_separator(vec![2]);
		add_total(&mut table, "Total revenue", &is.total_revenue);
		add_total(&mut table, "Total expense", &is.total_expense);
		add_total(&mut table, "Net income", &is.net_income);
		add_unclassified(&mut table, &is.unclassified);
		table
	}

	pub fn balance_sheet_table(bs: &BalanceSheet) -> Table {
		let mut table = Table::new(3);
		table.right_align(vec![2]);
		table.add_header(vec!["Account", "Class", "Amount"]);
		table.add_separator();
		add_statement_rows(&mut table, &bs.rows);

		table.add_partial_separator(vec![2]);
		add_total(&mut table, "Total assets", &bs.total_assets);
		add_total(&mut table, "Total liabilities", &bs.total_liabilities);
		add_total(&mut table, "Total equity", &bs.total_equity);
		add_unclassified(&mut table, &bs.unclassified);
		table
	}

	pub fn summary_table(summary: &Summary) -> Table {
		let mut table = Table::new(2);
		table.right_align(vec![1]);
		table.add_header(vec!["Metric", "Value"]);
		table.add_separator();

		let metrics = [
			("Net assets", &summary.net_assets),
			("Total assets", &summary.total_assets),
			("Total liabilities", &summary.total_liabilities),
			("Net income", &summary.net_income),
			("Total revenue", &summary.total_revenue),
			("Total expense", &summary.total_expense),
			("Total debits", &summary.total_debits),
			("Total credits", &summary.total_credits),
		];
		for (name, value) in metrics {
			table.add_row(vec![name.to_string(), fmt_amount(value)]);
		}
		let balanced = if summary.balanced { "yes" } else { "no" };
		table.add_row(vec!["Balanced".to_string(), balanced.to_string()]);
		table
	}

	// ------------
	// -- PRINTS --
	// ------------

	pub fn print_trial_balance(&self) {
		if self.tb.is_empty() {
			println!("No data");
			return;
		}
		self.trial_balance_table().print();
	}

	pub fn print_income_statement(&self, fs: &FinancialStatements) {
		if self.tb.is_empty() {
			println!("No data");
			return;
		}
		StatementReporter::income_statement_table(&fs.income_statement).print();
	}

	pub fn print_balance_sheet(&self, fs: &FinancialStatements) {
		if self.tb.is_empty() {
			println!("No data");
			return;
		}
		StatementReporter::balance_sheet_table(&fs.balance_sheet).print();
	}

	/// Both statements, income statement first.
	pub fn print_statements(&self, fs: &FinancialStatements) {
		if self.tb.is_empty() {
			println!("No data");
			return;
		}
		println!("Income Statement");
		StatementReporter::income_statement_table(&fs.income_statement).print();
		println!();
		println!("Balance Sheet");
		StatementReporter::balance_sheet_table(&fs.balance_sheet).print();
	}

	pub fn print_summary(&self) {
		if self.tb.is_empty() {
			println!("No data");
			return;
		}
		StatementReporter::summary_table(&Summary::from_trial_balance(self.tb))
			.print();
	}
}

/// Statement rows in their sorted order, with a blank line between classes.
fn add_statement_rows(table: &mut Table, rows: &[StatementRow]) {
	let mut last_class: Option<AccountClass> = None;
	for row in rows {
		if last_class.is_some_and(|c| c != row.class) {
			table.add_row(vec![String::new(), String::new(), String::new()]);
		}
		last_class = Some(row.class);

		table.add_row(vec![
			row.account.clone(),
			row.class.to_string(),
			fmt_amount(&row.amount),
		]);
	}
}

fn add_total(table: &mut Table, label: &str, amount: &Decimal) {
	table.add_row(vec![label.to_string(), String::new(), fmt_amount(amount)]);
}

/// Accounts missing from the chart go below the totals they are not part of.
fn add_unclassified(table: &mut Table, rows: &[StatementRow]) {
	if rows.is_empty() {
		return;
	}
	table.add_row(vec![String::new(), String::new(), String::new()]);
	table.add_row(vec![
		"Unclassified".to_string(),
		String::new(),
		String::new(),
	]);
	add_statement_rows(table, rows);
}
