use crate::orders::OrderStatus;

/// Service for managing order status transitions
pub struct StatusMachine;

impl StatusMachine {
    /// Check if a status transition is valid
    ///
    /// # Valid Transitions
    /// - New → Cooking
    /// - Cooking → InTransit
    /// - InTransit → Completed
    /// - Any status → Same status (idempotent)
    /// - Completed → (no transitions except to itself)
    pub fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
        // Same status is always valid (idempotent)
        if from == to {
            return true;
        }

        matches!(
            (from, to),
            (OrderStatus::New, OrderStatus::Cooking)
                | (OrderStatus::Cooking, OrderStatus::InTransit)
                | (OrderStatus::InTransit, OrderStatus::Completed)
        )
    }

    /// Attempt to transition from one status to another
    ///
    /// # Returns
    /// `Ok(to)` if the transition is valid, `Err(message)` otherwise
    pub fn transition(from: OrderStatus, to: OrderStatus) -> Result<OrderStatus, String> {
        if Self::is_valid_transition(from, to) {
            Ok(to)
        } else {
            Err(format!(
                "Invalid status transition from {} to {}",
                from, to
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_to_cooking() {
        assert!(StatusMachine::is_valid_transition(
            OrderStatus::New,
            OrderStatus::Cooking
        ));
    }

    #[test]
    fn test_cooking_to_in_transit() {
        assert!(StatusMachine::is_valid_transition(
            OrderStatus::Cooking,
            OrderStatus::InTransit
        ));
    }

    #[test]
    fn test_in_transit_to_completed() {
        assert!(StatusMachine::is_valid_transition(
            OrderStatus::InTransit,
            OrderStatus::Completed
        ));
    }

    // Skipping stages is not allowed
    #[test]
    fn test_new_to_in_transit_rejected() {
        assert!(!StatusMachine::is_valid_transition(
            OrderStatus::New,
            OrderStatus::InTransit
        ));
    }

    #[test]
    fn test_new_to_completed_rejected() {
        assert!(!StatusMachine::is_valid_transition(
            OrderStatus::New,
            OrderStatus::Completed
        ));
    }

    // Backward transitions are not allowed
    #[test]
    fn test_cooking_to_new_rejected() {
        assert!(!StatusMachine::is_valid_transition(
            OrderStatus::Cooking,
            OrderStatus::New
        ));
    }

    #[test]
    fn test_completed_is_terminal() {
        for to in [
            OrderStatus::New,
            OrderStatus::Cooking,
            OrderStatus::InTransit,
        ] {
            assert!(!StatusMachine::is_valid_transition(
                OrderStatus::Completed,
                to
            ));
        }
    }

    #[test]
    fn test_same_status_is_idempotent() {
        for status in [
            OrderStatus::New,
            OrderStatus::Cooking,
            OrderStatus::InTransit,
            OrderStatus::Completed,
        ] {
            assert!(StatusMachine::is_valid_transition(status, status));
        }
    }

    #[test]
    fn test_transition_valid() {
        let result = StatusMachine::transition(OrderStatus::New, OrderStatus::Cooking);
        assert_eq!(result.unwrap(), OrderStatus::Cooking);
    }

    #[test]
    fn test_transition_invalid() {
        let result = StatusMachine::transition(OrderStatus::New, OrderStatus::Completed);
        assert!(result.unwrap_err().contains("Invalid status transition"));
    }
}
