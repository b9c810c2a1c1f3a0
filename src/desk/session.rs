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
use crate::desk::command::{resolve_location, CommandParser, DeskCommand, HELP};
use crate::fleet::ledger::RentalLedger;
use crate::reports::fleet_reporter::{locations_table, FleetReporter};
use crate::reports::renderer::Renderer;
use anyhow::Error;
use std::io::BufRead;
use tracing::debug;

pub const TITLE: &str = "Bicycle Rental System";

/// The rental desk: reads one request per line and answers each through a
/// renderer. Requests are handled strictly one at a time, in input order.
///
/// The desk borrows the ledger rather than owning it, so whoever starts the
/// process decides its lifetime.
pub struct Desk<'a, R: Renderer> {
	ledger: &'a mut RentalLedger,
	renderer: R,
	parser: CommandParser,
}

impl<'a, R: Renderer> Desk<'a, R> {
	pub fn new(ledger: &'a mut RentalLedger, renderer: R) -> Result<Self, Error> {
		Ok(Self {
			ledger,
			renderer,
			parser: CommandParser::new()?,
		})
	}

	#[cfg(test)]
	pub fn into_renderer(self) -> R {
		self.renderer
	}

	/// Serves requests until the input ends or the renter quits.
	pub fn run<B: BufRead>(&mut self, input: B) -> Result<(), Error> {
		self.greet()?;
		self.renderer.prompt()?;

		for line in input.lines() {
			let line = line?;
			match self.parser.parse(&line) {
				None => {},
				Some(DeskCommand::Quit) => break,
				Some(command) => self.execute(command)?,
			}
			self.renderer.prompt()?;
		}

		debug!(active = self.ledger.active_count(), "desk closed");
		Ok(())
	}

	fn greet(&mut self) -> Result<(), Error> {
		self.renderer.text(TITLE)?;
		self.renderer.text(&self.ledger.config().tariff().summary())?;
		self.renderer.text(&self.ledger.status().to_string())
	}

	pub fn execute(&mut self, command: DeskCommand) -> Result<(), Error> {
		match command {
			DeskCommand::Rent {
				bike_id,
				hours,
				location,
			} => {
				let location = resolve_location(&location, self.ledger.config()).to_string();
				let outcome = self.ledger.rent(&bike_id, &hours, &location);
				self.renderer.outcome(&outcome, self.ledger.status())
			},
			DeskCommand::Return {
				bike_id,
				hours_held,
			} => {
				let outcome = self.ledger.return_bike(&bike_id, &hours_held);
				self.renderer.outcome(&outcome, self.ledger.status())
			},
			DeskCommand::Status => {
				self.renderer.text(&self.ledger.status().to_string())
			},
			DeskCommand::Bikes => {
				let reporter = FleetReporter::new(self.ledger);
				self.renderer.text(&reporter.availability_line())?;
				self.renderer.table(&reporter.fleet_table())
			},
			DeskCommand::Locations => {
				self.renderer.table(&locations_table(self.ledger.config()))
			},
			DeskCommand::Tariff => {
				self.renderer.text(&self.ledger.config().tariff().summary())
			},
			DeskCommand::Help => self.renderer.text(HELP),
			// handled by the read loop
			DeskCommand::Quit => Ok(()),
			DeskCommand::Unknown(word) => {
				self.renderer.failure(&format!("unknown command: {}", word))
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fleet::fleet_config::FleetConfig;
	use crate::fleet::tariff::Tariff;
	use crate::reports::renderer::{JsonRenderer, TerminalRenderer};

	fn ledger() -> RentalLedger {
		let config = FleetConfig::new(
			5,
			vec!["Greenwich Park".to_string(), "Regent's Park".to_string()],
			Tariff::default(),
		)
		.unwrap();
		RentalLedger::new(config)
	}

	fn run(ledger: &mut RentalLedger, script: &str) -> String {
		let renderer = TerminalRenderer::new(Vec::new(), false);
		let mut desk = Desk::new(ledger, renderer).unwrap();
		desk.run(script.as_bytes()).unwrap();
		String::from_utf8(desk.into_renderer().into_inner()).unwrap()
	}

	const GREETING: &str = "\
Bicycle Rental System
You will be charged £1 per hour. £5 for each extra hour.
0 rented out of 5
";

	#[test]
	fn test_greeting_only() {
		let mut ledger = ledger();
		assert_eq!(run(&mut ledger, ""), GREETING);
	}

	#[test]
	fn test_rent_and_return_session() {
		let mut ledger = ledger();
		let out = run(
			&mut ledger,
			"rent 3 2 \"Greenwich Park\"\n\nrent 3 1 #2\nreturn 3 5\nstatus\n",
		);
		let expected = format!(
			"{}{}",
			GREETING,
			"\
rented 3 for 2 hour(s)
1 rented out of 5
bike already rented
1 rented out of 5
returned 3, pay 17
0 rented out of 5
0 rented out of 5
"
		);
		assert_eq!(out, expected);
		assert_eq!(ledger.active_count(), 0);
	}

	#[test]
	fn test_location_shortcut() {
		let mut ledger = ledger();
		let out = run(&mut ledger, "rent 1 1 #2\nrent 2 1 #9\n");
		assert!(out.contains("rented 1 for 1 hour(s)"));
		assert!(out.contains("missing or invalid fields"));
		assert_eq!(ledger.active_count(), 1);
	}

	#[test]
	fn test_quit_stops_reading() {
		let mut ledger = ledger();
		run(&mut ledger, "rent 1 1 #1\nquit\nrent 2 1 #1\n");
		assert_eq!(ledger.active_count(), 1);
	}

	#[test]
	fn test_ledger_outlives_session() {
		let mut ledger = ledger();
		run(&mut ledger, "rent 4 3 #1\n");
		let out = run(&mut ledger, "return 4 3\n");
		assert!(out.contains("returned 4, pay 3"));
	}

	#[test]
	fn test_unknown_command_continues() {
		let mut ledger = ledger();
		let out = run(&mut ledger, "dance\nstatus\n");
		assert!(out.ends_with("unknown command: dance\n0 rented out of 5\n"));
	}

	#[test]
	fn test_bikes_listing() {
		let mut ledger = ledger();
		let out = run(&mut ledger, "rent 0 1 #1\nbikes\n");
		assert!(out.contains("4 out of 5 bikes are available\n"));
		assert!(out.contains("#0   RENTED"));
		assert!(out.contains("#4   AVAILABLE\n"));
	}

	#[test]
	fn test_json_session() {
		let mut ledger = ledger();
		let mut desk = Desk::new(&mut ledger, JsonRenderer::new(Vec::new())).unwrap();
		desk.run("rent 1 2 #1\nreturn 1 2\n".as_bytes()).unwrap();
		let out = String::from_utf8(desk.into_renderer().into_inner()).unwrap();

		let lines: Vec<serde_json::Value> = out
			.lines()
			.map(|l| serde_json::from_str(l).unwrap())
			.collect();
		// three greeting lines, then one per request
		assert_eq!(lines.len(), 5);
		assert_eq!(lines[3]["kind"], "rented");
		assert_eq!(lines[3]["active"], 1);
		assert_eq!(lines[4]["kind"], "returned");
		assert_eq!(lines[4]["fee"], "2");
		assert_eq!(lines[4]["active"], 0);
	}
}
