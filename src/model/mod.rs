pub mod demand;
pub mod queues;
pub mod stock;
