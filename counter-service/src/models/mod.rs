pub mod counter;

pub use counter::{CounterRequest, CounterResponse};
