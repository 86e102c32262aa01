mod aggregation;

pub use aggregation::{aggregate, round_up_to_increment};
