pub mod activity;

pub use activity::{ActivityMap, ActivityRecord};
