//! Stock-transfer arithmetic and preconditions.
//!
//! The backend is authoritative over every quantity; what lives here is the
//! subset the client can prove from the state it is displaying, so a call
//! that is certain to be rejected never leaves the process. Quantities are
//! whole units and never negative.

use stockdesk_core::{DomainError, DomainResult};

/// An article's stock as seen from one storage: the article's free pool
/// plus the units this storage has allocated.
///
/// # Invariants
/// - `free >= 0` and `allocated >= 0`.
/// - `assign`/`release` conserve `free + allocated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockPosition {
    pub free: i64,
    pub allocated: i64,
}

impl StockPosition {
    pub fn new(free: i64, allocated: i64) -> DomainResult<Self> {
        if free < 0 || allocated < 0 {
            return Err(DomainError::invariant("stock quantities cannot be negative"));
        }
        Ok(Self { free, allocated })
    }

    /// Units in existence for this article/storage pair.
    pub fn total(&self) -> i64 {
        self.free + self.allocated
    }

    /// Move `quantity` units from the free pool into the allocation.
    pub fn assign(&self, quantity: i64) -> DomainResult<Self> {
        validate_assign(self.free, quantity)?;
        Ok(Self {
            free: self.free - quantity,
            allocated: self.allocated + quantity,
        })
    }

    /// Move `quantity` units from the allocation back into the free pool.
    pub fn release(&self, quantity: i64) -> DomainResult<Self> {
        validate_remove(self.allocated, quantity)?;
        Ok(Self {
            free: self.free + quantity,
            allocated: self.allocated - quantity,
        })
    }
}

/// Transfers move whole positive quantities; zero and negative amounts are
/// rejected before anything else is looked at.
pub fn validate_transfer_quantity(quantity: i64) -> DomainResult<()> {
    if quantity <= 0 {
        return Err(DomainError::validation("transfer quantity must be positive"));
    }
    Ok(())
}

/// Precondition for assigning stock to a storage.
pub fn validate_assign(free_quantity: i64, quantity: i64) -> DomainResult<()> {
    validate_transfer_quantity(quantity)?;
    if quantity > free_quantity {
        return Err(DomainError::invariant(format!(
            "cannot assign {quantity} units; only {free_quantity} available"
        )));
    }
    Ok(())
}

/// Precondition for removing stock from a storage.
pub fn validate_remove(allocated_quantity: i64, quantity: i64) -> DomainResult<()> {
    validate_transfer_quantity(quantity)?;
    if quantity > allocated_quantity {
        return Err(DomainError::invariant(format!(
            "cannot remove {quantity} units; only {allocated_quantity} allocated"
        )));
    }
    Ok(())
}

/// Precondition for an absolute quantity set.
pub fn validate_set(new_quantity: i64) -> DomainResult<()> {
    if new_quantity < 0 {
        return Err(DomainError::validation("quantity cannot be negative"));
    }
    Ok(())
}

/// Precondition for a relative increment.
pub fn validate_increment(delta: i64) -> DomainResult<()> {
    if delta <= 0 {
        return Err(DomainError::validation("quantity adjustment must be positive"));
    }
    Ok(())
}

/// Precondition for a relative decrement: must not drive free stock below 0.
pub fn validate_decrement(free_quantity: i64, delta: i64) -> DomainResult<()> {
    validate_increment(delta)?;
    if delta > free_quantity {
        return Err(DomainError::invariant(format!(
            "cannot decrement by {delta}; only {free_quantity} in stock"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn assign_moves_units_out_of_the_free_pool() {
        let position = StockPosition::new(10, 2).unwrap();
        let after = position.assign(4).unwrap();

        assert_eq!(after, StockPosition { free: 6, allocated: 6 });
    }

    #[test]
    fn assign_rejects_zero_and_negative_quantities() {
        let position = StockPosition::new(10, 0).unwrap();
        assert!(matches!(position.assign(0), Err(DomainError::Validation(_))));
        assert!(matches!(position.assign(-3), Err(DomainError::Validation(_))));
    }

    #[test]
    fn assign_rejects_more_than_free_stock() {
        let position = StockPosition::new(3, 0).unwrap();
        assert!(matches!(
            position.assign(4),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn release_rejects_more_than_allocated() {
        let position = StockPosition::new(0, 2).unwrap();
        assert!(matches!(
            position.release(3),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn negative_positions_cannot_be_constructed() {
        assert!(StockPosition::new(-1, 0).is_err());
        assert!(StockPosition::new(0, -1).is_err());
    }

    #[test]
    fn decrement_below_zero_is_rejected() {
        assert!(validate_decrement(3, 5).is_err());
        assert!(validate_decrement(3, 3).is_ok());
    }

    #[test]
    fn set_accepts_zero_but_not_negative() {
        assert!(validate_set(0).is_ok());
        assert!(validate_set(-1).is_err());
    }

    proptest! {
        #[test]
        fn assign_conserves_total(free in 0i64..10_000, allocated in 0i64..10_000, qty in 1i64..10_000) {
            let position = StockPosition::new(free, allocated).unwrap();
            if let Ok(after) = position.assign(qty) {
                prop_assert_eq!(after.total(), position.total());
                prop_assert!(after.free >= 0 && after.allocated >= 0);
            }
        }

        #[test]
        fn assign_then_release_round_trips(free in 0i64..10_000, allocated in 0i64..10_000, qty in 1i64..10_000) {
            let position = StockPosition::new(free, allocated).unwrap();
            if let Ok(assigned) = position.assign(qty) {
                let restored = assigned.release(qty).unwrap();
                prop_assert_eq!(restored, position);
            }
        }
    }
}
