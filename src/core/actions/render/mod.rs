pub mod policy;
pub mod ports;
pub mod scheduler;
pub mod worker_pool;
