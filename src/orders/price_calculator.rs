use rust_decimal::Decimal;

/// Service for calculating order prices and subtotals
pub struct PriceCalculator;

impl PriceCalculator {
    /// Calculate subtotal for an order line item
    ///
    /// # Arguments
    /// * `quantity` - Number of items ordered
    /// * `price_snapshot` - Unit price at time of order
    ///
    /// # Returns
    /// Subtotal as Decimal (quantity * price_snapshot)
    pub fn calculate_subtotal(quantity: i32, price_snapshot: Decimal) -> Decimal {
        Decimal::from(quantity) * price_snapshot
    }

    /// Calculate total price for an order
    ///
    /// # Arguments
    /// * `subtotals` - Slice of subtotals for all order items
    ///
    /// # Returns
    /// Total price as Decimal (sum of all subtotals)
    pub fn calculate_total(subtotals: &[Decimal]) -> Decimal {
        subtotals.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_calculate_subtotal_basic() {
        let subtotal = PriceCalculator::calculate_subtotal(2, dec!(4.50));
        assert_eq!(subtotal, dec!(9.00));
    }

    #[test]
    fn test_calculate_subtotal_single_item() {
        let subtotal = PriceCalculator::calculate_subtotal(1, dec!(3.75));
        assert_eq!(subtotal, dec!(3.75));
    }

    #[test]
    fn test_calculate_total_multiple_items() {
        let subtotals = vec![dec!(10.00), dec!(5.50), dec!(3.25)];
        assert_eq!(PriceCalculator::calculate_total(&subtotals), dec!(18.75));
    }

    #[test]
    fn test_calculate_total_empty() {
        let subtotals: Vec<Decimal> = vec![];
        assert_eq!(PriceCalculator::calculate_total(&subtotals), dec!(0.00));
    }

    #[test]
    fn test_decimal_precision() {
        let subtotal = PriceCalculator::calculate_subtotal(3, dec!(4.33));
        assert_eq!(subtotal, dec!(12.99));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// Subtotal calculation invariant: subtotal = quantity * price for all
    /// valid inputs.
    #[test]
    fn prop_subtotal_calculation_invariant() {
        proptest!(|(
            quantity in 1i32..=1000,
            price_cents in 1u32..=10000u32
        )| {
            let price = Decimal::from(price_cents) / Decimal::from(100);
            let subtotal = PriceCalculator::calculate_subtotal(quantity, price);
            prop_assert_eq!(subtotal, Decimal::from(quantity) * price);
        });
    }

    /// Order totals are non-negative for non-negative inputs.
    #[test]
    fn prop_totals_are_non_negative() {
        proptest!(|(
            subtotals_cents in prop::collection::vec(1u32..=100000u32, 0..=20)
        )| {
            let subtotals: Vec<Decimal> = subtotals_cents
                .iter()
                .map(|&cents| Decimal::from(cents) / Decimal::from(100))
                .collect();

            let total = PriceCalculator::calculate_total(&subtotals);
            prop_assert!(total >= Decimal::ZERO);
        });
    }

    /// Order of subtotals doesn't affect the total.
    #[test]
    fn prop_total_is_commutative() {
        proptest!(|(
            subtotals_cents in prop::collection::vec(1u32..=10000u32, 2..=10)
        )| {
            let subtotals: Vec<Decimal> = subtotals_cents
                .iter()
                .map(|&cents| Decimal::from(cents) / Decimal::from(100))
                .collect();

            let total = PriceCalculator::calculate_total(&subtotals);

            let mut reversed = subtotals.clone();
            reversed.reverse();
            prop_assert_eq!(total, PriceCalculator::calculate_total(&reversed));
        });
    }
}
