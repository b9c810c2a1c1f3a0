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
use anyhow::{bail, Error};

/// Pricing for a rental. Every reserved hour costs one currency unit; each
/// hour held past the reservation is billed at the late fee multiplier
/// instead of the base rate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tariff {
	late_fee_multiplier: Decimal,
	currency: String,
}

impl Tariff {
	pub const DEFAULT_CURRENCY: &'static str = "£";
	pub const DEFAULT_LATE_FEE: u32 = 5;

	pub fn new(late_fee_multiplier: Decimal, currency: &str) -> Result<Self, Error> {
		if late_fee_multiplier.is_zero() {
			bail!("Late fee multiplier must be positive");
		}

		Ok(Self {
			late_fee_multiplier,
			currency: currency.to_string(),
		})
	}

	pub fn base_rate() -> Decimal {
		Decimal::from_u32(1)
	}

	pub fn late_fee_multiplier(&self) -> Decimal {
		self.late_fee_multiplier
	}

	pub fn currency(&self) -> &str {
		&self.currency
	}

	/// Computes what is owed for holding a bike `held` hours against a
	/// reservation of `reserved` hours. Returns None only if the arithmetic
	/// would overflow.
	pub fn fee(&self, reserved: Decimal, held: Decimal) -> Option<Decimal> {
		if held <= reserved {
			return held.checked_mul(Self::base_rate());
		}

		let overage = held.checked_sub(reserved)?;
		let late = overage.checked_mul(self.late_fee_multiplier)?;
		reserved.checked_mul(Self::base_rate())?.checked_add(late)
	}

	/// The line shown to renters before they check a bike out.
	pub fn summary(&self) -> String {
		format!(
			"You will be charged {}{} per hour. {}{} for each extra hour.",
			self.currency,
			Self::base_rate(),
			self.currency,
			self.late_fee_multiplier
		)
	}
}

impl Default for Tariff {
	fn default() -> Self {
		Self {
			late_fee_multiplier: Decimal::from_u32(Self::DEFAULT_LATE_FEE),
			currency: Self::DEFAULT_CURRENCY.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn dec(s: &str) -> Decimal {
		s.parse().unwrap()
	}

	fn tariff(multiplier: &str) -> Tariff {
		Tariff::new(dec(multiplier), Tariff::DEFAULT_CURRENCY).unwrap()
	}

	#[test]
	fn test_on_time_return_pays_hours_held() {
		let t = tariff("5");
		assert_eq!(t.fee(dec("2"), dec("2")), Some(dec("2")));
	}

	#[test]
	fn test_early_return_pays_hours_held() {
		let t = tariff("5");
		assert_eq!(t.fee(dec("3"), dec("1.5")), Some(dec("1.5")));
	}

	#[test]
	fn test_overage_billed_at_multiplier() {
		let t = tariff("5");
		// 2 reserved + 3 late hours at 5
		assert_eq!(t.fee(dec("2"), dec("5")), Some(dec("17")));
	}

	#[test]
	fn test_fractional_overage() {
		let t = tariff("5");
		assert_eq!(t.fee(dec("1.5"), dec("2")), Some(dec("4")));
	}

	#[test]
	fn test_fractional_multiplier() {
		let t = tariff("1.5");
		assert_eq!(t.fee(dec("1"), dec("3")), Some(dec("4")));
	}

	#[test]
	fn test_overflow_is_none() {
		let t = tariff("5");
		let huge = Decimal::new(u128::MAX / 2, 0);
		assert_eq!(t.fee(dec("1"), huge), None);
	}

	#[test]
	fn test_zero_multiplier_rejected() {
		assert!(Tariff::new(Decimal::zero(), "$").is_err());
	}

	#[test]
	fn test_summary() {
		assert_eq!(
			tariff("5").summary(),
			"You will be charged £1 per hour. £5 for each extra hour."
		);
		assert_eq!(
			Tariff::new(dec("2.5"), "$").unwrap().summary(),
			"You will be charged $1 per hour. $2.5 for each extra hour."
		);
	}
}
