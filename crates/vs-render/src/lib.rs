pub mod hit;

pub use hit::{hit_test, hit_test_rect};
