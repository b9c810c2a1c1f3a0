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
use crate::util::decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Why a rent or return request was refused. The display strings are the
/// exact messages shown to the renter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RentalError {
	/// A required input was blank, or the location is not one we serve
	#[error("missing or invalid fields")]
	MissingField,
	/// A number failed to parse or is not positive
	#[error("invalid numeric input")]
	InvalidNumber,
	#[error("bike id out of range")]
	OutOfRange,
	#[error("bike already rented")]
	AlreadyRented,
	#[error("bike not currently rented")]
	NotRented,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
	Rented,
	Returned,
	MissingField,
	InvalidNumber,
	OutOfRange,
	AlreadyRented,
	NotRented,
}

impl From<RentalError> for OutcomeKind {
	fn from(err: RentalError) -> Self {
		match err {
			RentalError::MissingField => OutcomeKind::MissingField,
			RentalError::InvalidNumber => OutcomeKind::InvalidNumber,
			RentalError::OutOfRange => OutcomeKind::OutOfRange,
			RentalError::AlreadyRented => OutcomeKind::AlreadyRented,
			RentalError::NotRented => OutcomeKind::NotRented,
		}
	}
}

/// The answer to every ledger request. Failures are values too; nothing a
/// renter types can make the ledger return an error or panic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RentalOutcome {
	ok: bool,
	kind: OutcomeKind,
	message: String,
	fee: Option<Decimal>,
}

impl RentalOutcome {
	pub fn rented(message: String) -> Self {
		Self {
			ok: true,
			kind: OutcomeKind::Rented,
			message,
			fee: None,
		}
	}

	pub fn returned(message: String, fee: Decimal) -> Self {
		Self {
			ok: true,
			kind: OutcomeKind::Returned,
			message,
			fee: Some(fee),
		}
	}

	pub fn failure(err: RentalError) -> Self {
		Self {
			ok: false,
			kind: err.into(),
			message: err.to_string(),
			fee: None,
		}
	}

	pub fn is_ok(&self) -> bool {
		self.ok
	}

	pub fn kind(&self) -> OutcomeKind {
		self.kind
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	pub fn fee(&self) -> Option<Decimal> {
		self.fee
	}
}
