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
use crate::fleet::fleet_config::FleetConfig;
use crate::fleet::ledger::RentalLedger;
use crate::fleet::record::BikeId;
use crate::reports::table::Table;

/// Builds the listings the desk can show about the fleet.
pub struct FleetReporter<'a> {
	ledger: &'a RentalLedger,
}

impl<'a> FleetReporter<'a> {
	pub fn new(ledger: &'a RentalLedger) -> Self {
		Self { ledger }
	}

	pub fn availability_line(&self) -> String {
		format!(
			"{} out of {} bikes are available",
			self.ledger.available_count(),
			self.ledger.total_bikes()
		)
	}

	/// One row per bike in the fleet, rented or not.
	pub fn fleet_table(&self) -> Table {
		let mut table = Table::new(5);
		table.add_header(vec!["Bike", "Status", "Hours", "Pickup", "Since"]);
		table.add_separator();
		table.right_align(vec![0, 2]);

		for id in BikeId::all(self.ledger.total_bikes()) {
			let row = match self.ledger.record(id) {
				Some(record) => vec![
					format!("#{}", id),
					"RENTED".to_string(),
					record.reserved_hours().to_string(),
					record.pickup_location().to_string(),
					record.rented_at().format("%H:%M").to_string(),
				],
				None => vec![format!("#{}", id), "AVAILABLE".to_string()],
			};
			table.add_row(row);
		}

		table
	}
}

/// Numbered pickup locations; the numbers are what `#N` refers to at the
/// desk.
pub fn locations_table(config: &FleetConfig) -> Table {
	let mut table = Table::new(2);
	table.add_header(vec!["#", "Pickup location"]);
	table.add_separator();
	table.right_align(vec![0]);

	for (i, location) in config.pickup_locations().iter().enumerate() {
		table.add_row(vec![(i + 1).to_string(), location.clone()]);
	}

	table
}
