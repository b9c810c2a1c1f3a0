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

/// Plain text table for listings such as the fleet overview and the pickup
/// locations. Rendering produces a string so that any renderer can decide
/// where it goes.
pub struct Table {
	column_count: usize,
	rows: Vec<Row>,
	right_align: Vec<bool>, // indicates columns by index
}

pub enum Row {
	Header(Vec<String>),
	Data(Vec<String>),
	Separator,
}

impl Table {
	pub fn new(column_count: usize) -> Self {
		Self {
			column_count,
			rows: Vec::new(),
			right_align: vec![false; column_count],
		}
	}

	pub fn add_header(&mut self, row: Vec<&str>) {
		let cells = self.fit(row);
		self.rows.push(Row::Header(cells));
	}

	pub fn add_row(&mut self, row: Vec<String>) {
		let cells = self.fit(row.iter().map(|s| s.as_str()).collect());
		self.rows.push(Row::Data(cells));
	}

	pub fn add_separator(&mut self) {
		self.rows.push(Row::Separator);
	}

	/// Specifies columns that should be right-aligned by index.
	pub fn right_align(&mut self, cols: Vec<usize>) {
		for col in cols {
			if col < self.column_count {
				self.right_align[col] = true;
			}
		}
	}

	/// Header and data rows as plain cells, separators skipped.
	pub fn cells(&self) -> Vec<&[String]> {
		self.rows
			.iter()
			.filter_map(|row| match row {
				Row::Header(cells) | Row::Data(cells) => Some(cells.as_slice()),
				Row::Separator => None,
			})
			.collect()
	}

	pub fn render(&self) -> String {
		let mut max_widths = vec![0; self.column_count];
		for cells in self.cells() {
			for (i, value) in cells.iter().enumerate() {
				max_widths[i] = max_widths[i].max(value.chars().count());
			}
		}

		let mut out = String::new();
		for row in &self.rows {
			let line = match row {
				Row::Header(cells) => self.centered_line(&max_widths, cells),
				Row::Data(cells) => self.data_line(&max_widths, cells),
				Row::Separator => {
					let width = max_widths.iter().sum::<usize>()
						+ 3 * self.column_count.saturating_sub(1);
					"-".repeat(width)
				},
			};
			out.push_str(line.trim_end());
			out.push('\n');
		}
		out
	}

	/// Pads or truncates a row to the column count.
	fn fit(&self, row: Vec<&str>) -> Vec<String> {
		let mut cells: Vec<String> = row
			.into_iter()
			.take(self.column_count)
			.map(|s| s.to_string())
			.collect();
		cells.resize(self.column_count, String::new());
		cells
	}

	fn data_line(&self, max_widths: &[usize], cells: &[String]) -> String {
		let mut line = String::new();
		for (i, value) in cells.iter().enumerate() {
			if i > 0 {
				line.push_str("   ");
			}
			// width counts chars, so pad by hand rather than with {:<w$}
			let padding = " ".repeat(max_widths[i] - value.chars().count());
			if self.right_align[i] {
				line.push_str(&padding);
				line.push_str(value);
			} else {
				line.push_str(value);
				line.push_str(&padding);
			}
		}
		line
	}

	fn centered_line(&self, max_widths: &[usize], cells: &[String]) -> String {
		let mut line = String::new();
		for (i, value) in cells.iter().enumerate() {
			if i > 0 {
				line.push_str(" | ");
			}
			line.push_str(&center_align(value, max_widths[i]));
		}
		line
	}
}

fn center_align(value: &str, width: usize) -> String {
	let len = value.chars().count();
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

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_render_aligns_columns() {
		let mut table = Table::new(2);
		table.add_header(vec!["#", "Location"]);
		table.add_separator();
		table.add_row(vec!["1".into(), "Canary Wharf".into()]);
		table.add_row(vec!["10".into(), "X".into()]);
		table.right_align(vec![0]);

		let expected = concat!(
			"#  |   Location\n",
			"-----------------\n",
			" 1   Canary Wharf\n",
			"10   X\n",
		);
		assert_eq!(table.render(), expected);
	}

	#[test]
	fn test_rows_fit_column_count() {
		let mut table = Table::new(2);
		table.add_row(vec!["a".into()]);
		table.add_row(vec!["b".into(), "c".into(), "d".into()]);
		let cells = table.cells();
		assert_eq!(cells[0], ["a".to_string(), String::new()]);
		assert_eq!(cells[1], ["b".to_string(), "c".to_string()]);
	}

	#[test]
	fn test_multibyte_widths() {
		let mut table = Table::new(2);
		table.add_row(vec!["£17".into(), "x".into()]);
		table.add_row(vec!["£1".into(), "y".into()]);
		assert_eq!(table.render(), "£17   x\n£1    y\n");
	}
}
