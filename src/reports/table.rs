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

/// Standard table printer for every report. Each report is a flat list of
/// single-line rows, optionally followed by totals.
pub struct Table {
	column_count: usize,
	rows: Vec<Row>,
	right_align: Vec<bool>, // indicates columns by index
}

pub enum Row {
	Header(Vec<String>),
	Data(Vec<String>),
	Separator,
	PartialSeparator(Vec<bool>), // indicates columns by index
}

impl Table {
	pub fn new(column_count: usize) -> Self {
		Self {
			column_count,
			rows: Vec::new(),
			right_align: vec![false; column_count],
		}
	}

	/// Adds a header row.
	pub fn add_header(&mut self, row: Vec<&str>) {
		self.rows.push(Row::Header(
			row.into_iter().map(|s| s.to_string()).collect(),
		));
	}

	/// Adds a data row.
	pub fn add_row(&mut self, row: Vec<String>) {
		self.rows.push(Row::Data(row));
	}

	/// Adds a full separator row.
	pub fn add_separator(&mut self) {
		self.rows.push(Row::Separator);
	}

	/// Adds a partial separator row for selected columns.
	pub fn add_partial_separator(&mut self, indices: Vec<usize>) {
		let mut cols = vec![false; self.column_count];
		for i in indices {
			cols[i] = true;
		}
		self.rows.push(Row::PartialSeparator(cols));
	}

	/// Specifies columns that should be right-aligned by index.
	pub fn right_align(&mut self, cols: Vec<usize>) {
		for col in cols {
			self.right_align[col] = true;
		}
	}

	/// True if no data rows have been added.
	pub fn is_empty(&self) -> bool {
		!self.rows.iter().any(|r| matches!(r, Row::Data(_)))
	}

	pub fn print(&self) {
		print!("{}", self.render());
	}

	/// Prints the table, or a placeholder when a period has nothing to show.
	pub fn print_or_empty(&self) {
		if self.is_empty() {
			println!("No data");
		} else {
			self.print();
		}
	}

	pub fn render(&self) -> String {
		let mut out = String::new();
		let mut max_widths = vec![0; self.column_count];

		// Calculate maximum column widths for proper spacing
		for row in &self.rows {
			if let Row::Data(data_row) | Row::Header(data_row) = row {
				for (i, value) in data_row.iter().enumerate() {
					max_widths[i] = max_widths[i].max(width_of(value));
				}
			}
		}

		for row in &self.rows {
			match row {
				Row::Header(header_row) => {
					self.render_centered_row(&mut out, &max_widths, header_row)
				},
				Row::Data(data_row) => {
					self.render_data_row(&mut out, &max_widths, data_row)
				},
				Row::Separator => self.render_separator(&mut out, &max_widths),
				Row::PartialSeparator(data_sep) => {
					self.render_partial_separator(&mut out, &max_widths, data_sep)
				},
			}
		}

		out
	}

	fn render_data_row(
		&self,
		out: &mut String,
		max_widths: &[usize],
		data_row: &[String],
	) {
		let cells: Vec<String> = data_row
			.iter()
			.enumerate()
			.map(|(i, value)| {
				let padding = " ".repeat(max_widths[i] - width_of(value));
				if self.right_align[i] {
					format!("{}{}", padding, value)
				} else {
					format!("{}{}", value, padding)
				}
			})
			.collect();
		out.push_str(cells.join("   ").trim_end());
		out.push('\n');
	}

	fn render_centered_row(
		&self,
		out: &mut String,
		max_widths: &[usize],
		header_row: &[String],
	) {
		let cells: Vec<String> = header_row
			.iter()
			.enumerate()
			.map(|(i, value)| Table::center_align(value, max_widths[i]))
			.collect();
		out.push_str(cells.join(" | ").trim_end());
		out.push('\n');
	}

	fn render_separator(&self, out: &mut String, max_widths: &[usize]) {
		let total_width: usize =
			max_widths.iter().sum::<usize>() + (3 * (self.column_count - 1));
		out.push_str(&"-".repeat(total_width));
		out.push('\n');
	}

	fn render_partial_separator(
		&self,
		out: &mut String,
		max_widths: &[usize],
		data_sep: &[bool],
	) {
		let cells: Vec<String> = data_sep
			.iter()
			.enumerate()
			.map(|(i, draw)| {
				let fill = if *draw { "-" } else { " " };
				fill.repeat(max_widths[i])
			})
			.collect();
		out.push_str(cells.join("   ").trim_end());
		out.push('\n');
	}

	fn center_align(value: &str, width: usize) -> String {
		let len = width_of(value);
		if len >= width {
			return value.to_string();
		}
		let total_padding = width - len;
		let left_padding = total_padding / 2;
		let right_padding = total_padding - left_padding;

		format!(
			"{}{}{}",
			" ".repeat(left_padding),
			value,
			" ".repeat(right_padding)
		)
	}
}

/// Account names are often Japanese, so count chars rather than bytes.
fn width_of(value: &str) -> usize {
	value.chars().count()
}
