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
use crate::fleet::ledger::FleetStatus;
use crate::fleet::outcome::RentalOutcome;
use crate::reports::table::Table;
use anyhow::Error;
use serde::Serialize;
use serde_json::json;
use std::io::Write;

/// Where the desk sends everything the renter should see. The ledger never
/// renders; it only hands back outcomes for one of these to display.
pub trait Renderer {
	/// Shows the result of a rent or return, followed by the fleet counter.
	fn outcome(
		&mut self,
		outcome: &RentalOutcome,
		status: FleetStatus,
	) -> Result<(), Error>;

	fn text(&mut self, text: &str) -> Result<(), Error>;

	/// A desk-level problem that never reached the ledger.
	fn failure(&mut self, text: &str) -> Result<(), Error>;

	fn table(&mut self, table: &Table) -> Result<(), Error>;

	/// Invites the next line of input, if anyone is there to see it.
	fn prompt(&mut self) -> Result<(), Error> {
		Ok(())
	}
}

/// 24-bit foreground colors for the two kinds of message.
const SUCCESS_RGB: (u8, u8, u8) = (0x5d, 0xe1, 0x44);
const FAILURE_RGB: (u8, u8, u8) = (0xe1, 0x44, 0x5d);

pub struct TerminalRenderer<W: Write> {
	out: W,
	color: bool,
	/// Only set when a person is typing; scripted input gets no prompts
	interactive: bool,
}

impl<W: Write> TerminalRenderer<W> {
	pub fn new(out: W, color: bool) -> Self {
		Self {
			out,
			color,
			interactive: false,
		}
	}

	pub fn interactive(mut self, interactive: bool) -> Self {
		self.interactive = interactive;
		self
	}

	pub fn into_inner(self) -> W {
		self.out
	}

	fn paint(&self, text: &str, (r, g, b): (u8, u8, u8)) -> String {
		if !self.color {
			return text.to_string();
		}
		format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, text)
	}
}

impl<W: Write> Renderer for TerminalRenderer<W> {
	fn outcome(
		&mut self,
		outcome: &RentalOutcome,
		status: FleetStatus,
	) -> Result<(), Error> {
		let rgb = if outcome.is_ok() {
			SUCCESS_RGB
		} else {
			FAILURE_RGB
		};
		let message = self.paint(outcome.message(), rgb);
		writeln!(self.out, "{}", message)?;
		writeln!(self.out, "{}", status)?;
		Ok(())
	}

	fn text(&mut self, text: &str) -> Result<(), Error> {
		writeln!(self.out, "{}", text)?;
		Ok(())
	}

	fn failure(&mut self, text: &str) -> Result<(), Error> {
		let message = self.paint(text, FAILURE_RGB);
		writeln!(self.out, "{}", message)?;
		Ok(())
	}

	fn table(&mut self, table: &Table) -> Result<(), Error> {
		write!(self.out, "{}", table.render())?;
		Ok(())
	}

	fn prompt(&mut self) -> Result<(), Error> {
		if self.interactive {
			write!(self.out, "> ")?;
			self.out.flush()?;
		}
		Ok(())
	}
}

/// Emits one JSON object per line, for front ends that drive the desk
/// over a pipe.
pub struct JsonRenderer<W: Write> {
	out: W,
}

#[derive(Serialize)]
struct OutcomeLine<'a> {
	#[serde(flatten)]
	outcome: &'a RentalOutcome,
	#[serde(flatten)]
	status: FleetStatus,
}

impl<W: Write> JsonRenderer<W> {
	pub fn new(out: W) -> Self {
		Self { out }
	}

	pub fn into_inner(self) -> W {
		self.out
	}

	fn line<T: Serialize>(&mut self, value: &T) -> Result<(), Error> {
		serde_json::to_writer(&mut self.out, value)?;
		writeln!(self.out)?;
		self.out.flush()?;
		Ok(())
	}
}

impl<W: Write> Renderer for JsonRenderer<W> {
	fn outcome(
		&mut self,
		outcome: &RentalOutcome,
		status: FleetStatus,
	) -> Result<(), Error> {
		self.line(&OutcomeLine { outcome, status })
	}

	fn text(&mut self, text: &str) -> Result<(), Error> {
		self.line(&json!({ "text": text }))
	}

	fn failure(&mut self, text: &str) -> Result<(), Error> {
		self.line(&json!({ "ok": false, "message": text }))
	}

	fn table(&mut self, table: &Table) -> Result<(), Error> {
		self.line(&json!({ "rows": table.cells() }))
	}
}
