// src/model/stock.rs

/// On-hand stock of the simulated item.
///
/// Unmet demand is lost; there is no backlog.
#[derive(Debug, Clone)]
pub struct StockPoint {
    pub stock_level: u32,

    // Tracking for logging
    pub last_demand: u32,
    pub last_fulfilled: u32,
    pub last_received: u32,
}

impl StockPoint {
    pub fn new(initial_stock: u32) -> Self {
        Self {
            stock_level: initial_stock,
            last_demand: 0,
            last_fulfilled: 0,
            last_received: 0,
        }
    }

    /// Step 1: goods arrive from the supplier.
    pub fn receive_shipment(&mut self, quantity: u32) {
        self.stock_level = self.stock_level.saturating_add(quantity);
        self.last_received = quantity;
    }

    /// Step 2: serve as much of today's demand as stock allows.
    ///
    /// Returns the quantity shipped to customers.
    pub fn fulfill(&mut self, demand: u32) -> u32 {
        let shipped = self.stock_level.min(demand);
        self.stock_level -= shipped;
        self.last_demand = demand;
        self.last_fulfilled = shipped;
        shipped
    }

    pub fn lost_sales(&self) -> u32 {
        self.last_demand - self.last_fulfilled
    }

    pub fn at_or_below(&self, reorder_point: u32) -> bool {
        self.stock_level <= reorder_point
    }

    pub fn is_stocked_out(&self) -> bool {
        self.stock_level == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_fulfilment_loses_the_rest() {
        let mut stock = StockPoint::new(7);
        assert_eq!(stock.fulfill(10), 7);
        assert_eq!(stock.stock_level, 0);
        assert_eq!(stock.lost_sales(), 3);
        assert!(stock.is_stocked_out());

        stock.receive_shipment(50);
        assert_eq!(stock.last_received, 50);
        assert_eq!(stock.fulfill(10), 10);
        assert_eq!(stock.stock_level, 40);
        assert_eq!(stock.lost_sales(), 0);
    }

    #[test]
    fn reorder_threshold_is_inclusive() {
        let stock = StockPoint::new(20);
        assert!(stock.at_or_below(20));
        assert!(!stock.at_or_below(19));
    }
}
