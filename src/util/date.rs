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
use anyhow::{anyhow, bail, Error};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

/// Day zero of spreadsheet serial dates. Serial 1 is 1899-12-31; counting
/// from the 30th rather than the 31st absorbs the nonexistent 1900-02-29
/// that spreadsheets inherited, so modern serials land on the right day.
const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Serial number of 9999-12-31. Anything larger cannot be a real date.
const MAX_SERIAL: f64 = 2_958_465.0;

/// A calendar day. Journal rows only ever carry a day, never a time.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date(NaiveDate);

impl Date {
	/// Constructor to parse a string in the "YYYY-mm-dd" format. Slashes
	/// are accepted in place of dashes, since spreadsheets export both.
	pub fn from_str(date_str: &str) -> Result<Date, Error> {
		let trimmed = date_str.trim();
		NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
			.or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y/%m/%d"))
			.map(Date)
			.map_err(|_| anyhow!("Date format must be YYYY-MM-DD: {}", date_str))
	}

	pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Date, Error> {
		match NaiveDate::from_ymd_opt(year, month, day) {
			Some(d) => Ok(Date(d)),
			None => bail!("Invalid date {:04}-{:02}-{:02}", year, month, day),
		}
	}

	/// Converts a spreadsheet serial day number. Any fractional part is a
	/// time of day and is dropped. Returns None for values that do not map
	/// to a calendar day.
	pub fn from_serial(days: f64) -> Option<Date> {
		if !days.is_finite() || days < 0.0 || days > MAX_SERIAL {
			return None;
		}

		let (y, m, d) = SERIAL_EPOCH;
		NaiveDate::from_ymd_opt(y, m, d)?
			.checked_add_days(Days::new(days.floor() as u64))
			.map(Date)
	}

	/// Reads a raw cell: a serial number first, then an ISO-style date.
	/// Blank or unreadable cells are simply missing.
	pub fn from_cell(cell: &str) -> Option<Date> {
		let trimmed = cell.trim();
		if trimmed.is_empty() {
			return None;
		}

		match trimmed.parse::<f64>() {
			Ok(serial) => Date::from_serial(serial),
			Err(_) => Date::from_str(trimmed).ok(),
		}
	}

	pub fn min() -> Date {
		Date(NaiveDate::MIN)
	}

	pub fn max() -> Date {
		Date(NaiveDate::MAX)
	}

	pub fn year(&self) -> i32 {
		self.0.year()
	}

	/// "YYYY-MM", the key monthly reports group by.
	pub fn month_key(&self) -> String {
		format!("{:04}-{:02}", self.0.year(), self.0.month())
	}
}

impl fmt::Display for Date {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0.format("%Y-%m-%d"))
	}
}

impl Serialize for Date {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

/// An inclusive range of days that reports are restricted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Period {
	pub begin: Date,
	pub end: Date,
}

impl Period {
	pub fn new(begin: Date, end: Date) -> Result<Self, Error> {
		if begin > end {
			bail!("Period begins ({}) after it ends ({})", begin, end);
		}

		Ok(Self { begin, end })
	}

	/// A calendar fiscal year, January 1 through December 31.
	pub fn year(year: i32) -> Result<Self, Error> {
		Period::new(Date::from_ymd(year, 1, 1)?, Date::from_ymd(year, 12, 31)?)
	}

	pub fn contains(&self, date: &Date) -> bool {
		(self.begin..=self.end).contains(date)
	}
}

impl fmt::Display for Period {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} ~ {}", self.begin, self.end)
	}
}
