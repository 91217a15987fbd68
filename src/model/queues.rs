// src/model/queues.rs

use serde::Serialize;
use std::collections::VecDeque;

/// A replenishment order travelling from the supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingOrder {
    pub quantity: u32,
    pub order_day: u32,
    pub arrival_day: u32,
}

/// Orders placed but not yet received, in placement order.
#[derive(Debug, Clone, Default)]
pub struct PendingOrderQueue {
    buffer: VecDeque<PendingOrder>,
}

impl PendingOrderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues an order placed on `day` that lands `lead_time` days later.
    ///
    /// Arrivals are processed before the reorder check, so the earliest an
    /// order can land is the next morning: a zero lead time behaves as one day.
    pub fn push_departure(&mut self, quantity: u32, day: u32, lead_time: u32) -> PendingOrder {
        let order = PendingOrder {
            quantity,
            order_day: day,
            arrival_day: day.saturating_add(lead_time.max(1)),
        };
        self.buffer.push_back(order);
        order
    }

    /// Removes every order due on `day` and returns the total quantity.
    /// Call this at the START of the day.
    pub fn pop_arrivals(&mut self, day: u32) -> u32 {
        let mut arrived = 0u32;
        self.buffer.retain(|order| {
            if order.arrival_day == day {
                arrived = arrived.saturating_add(order.quantity);
                false
            } else {
                true
            }
        });
        arrived
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingOrder> {
        self.buffer.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_arrives_after_lead_time() {
        let mut queue = PendingOrderQueue::new();
        let order = queue.push_departure(50, 8, 7);
        assert_eq!(order.arrival_day, 15);

        for day in 9..15 {
            assert_eq!(queue.pop_arrivals(day), 0);
        }
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_arrivals(15), 50);
        assert!(queue.is_empty());
    }

    #[test]
    fn zero_lead_time_lands_next_morning() {
        let mut queue = PendingOrderQueue::new();
        let order = queue.push_departure(30, 4, 0);
        assert_eq!(order.arrival_day, 5);
        assert_eq!(queue.pop_arrivals(4), 0);
        assert_eq!(queue.pop_arrivals(5), 30);
        assert!(queue.is_empty());
    }

    #[test]
    fn only_due_orders_are_released() {
        let mut queue = PendingOrderQueue::new();
        queue.push_departure(10, 1, 2);
        queue.push_departure(20, 2, 5);

        assert_eq!(queue.pop_arrivals(3), 10);
        assert_eq!(queue.iter().map(|o| o.quantity).collect::<Vec<_>>(), vec![20]);
    }
}
