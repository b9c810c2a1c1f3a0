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
use crate::config::config_file::Overrides;
use crate::config::filesystem;
use crate::desk::session::{Desk, TITLE};
use crate::fleet::fleet_config::FleetConfig;
use crate::fleet::ledger::RentalLedger;
use crate::reports::fleet_reporter::locations_table;
use crate::reports::renderer::{JsonRenderer, Renderer, TerminalRenderer};
use anyhow::{bail, Error};
use clap::{Parser, ValueEnum};
use std::io::{self, IsTerminal};
use tracing::info;

mod config;
mod desk;
mod fleet;
mod reports;
mod util;

#[derive(Parser)]
#[command(name = "pedalr", version = "0.1", about = "Bicycle rental desk")]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	// -----------
	// -- FLAGS --
	// -----------
	/// Custom config file location (default: ~/.config/pedalr/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Number of bikes in the fleet, overriding the config file
	#[arg(short, long)]
	bikes: Option<u32>,

	/// Charge per hour held past the reservation, overriding the config file
	#[arg(short, long = "late-fee")]
	late_fee: Option<f64>,

	/// Never color output
	#[arg(long)]
	plain: bool,

	/// Print one JSON object per line instead of text
	#[arg(long, conflicts_with = "plain")]
	json: bool,

	/// Log debugging detail to stderr
	#[arg(short, long)]
	verbose: bool,
}

impl Cli {
	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		if self.bikes == Some(0) {
			bail!("The fleet needs at least one bike");
		}

		if let Some(rate) = self.late_fee {
			if !rate.is_finite() || rate <= 0.0 {
				bail!("Late fee must be a positive number");
			}
		}

		Ok(())
	}
}

#[derive(ValueEnum, Clone, Copy, PartialEq)]
enum Directive {
	Desk,      // interactive rental desk
	Locations, // list pickup locations
	Tariff,    // show pricing
	Fleet,     // show fleet configuration
}

fn main() -> Result<(), Error> {
	let args = Cli::parse();
	args.validate()?;
	util::logging::init(args.verbose);

	let config = filesystem::get_config(args.config.as_deref())?;
	let fleet = config.fleet_config(&Overrides {
		total_bikes: args.bikes,
		late_fee_per_hour: args.late_fee,
	})?;

	let color = config.color() && !args.plain && io::stdout().is_terminal();
	let stdout = io::stdout().lock();

	if args.json {
		run(args.command, fleet, JsonRenderer::new(stdout))
	} else {
		let interactive = io::stdin().is_terminal();
		let renderer = TerminalRenderer::new(stdout, color).interactive(interactive);
		run(args.command, fleet, renderer)
	}
}

fn run<R: Renderer>(
	command: Directive,
	fleet: FleetConfig,
	mut renderer: R,
) -> Result<(), Error> {
	match command {
		Directive::Desk => {
			info!(
				bikes = fleet.total_bikes(),
				locations = fleet.pickup_locations().len(),
				"opening desk"
			);
			// the ledger lives exactly as long as this process
			let mut ledger = RentalLedger::new(fleet);
			let mut desk = Desk::new(&mut ledger, renderer)?;
			desk.run(io::stdin().lock())?;
		},
		Directive::Locations => renderer.table(&locations_table(&fleet))?,
		Directive::Tariff => renderer.text(&fleet.tariff().summary())?,
		Directive::Fleet => {
			renderer.text(TITLE)?;
			renderer.text(&format!("Bikes: {}", fleet.total_bikes()))?;
			renderer.text(&format!(
				"Late fee: {}{} per extra hour",
				fleet.tariff().currency(),
				fleet.tariff().late_fee_multiplier()
			))?;
			renderer.text(&format!(
				"Pickup locations: {}",
				fleet.pickup_locations().len()
			))?;
		},
	}

	Ok(())
}
