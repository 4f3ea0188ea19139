pub use super::factories::{PlanFactory, RowFactory};

pub struct Factory;

impl Factory {
    pub fn row() -> RowFactory {
        RowFactory::new()
    }

    pub fn plan() -> PlanFactory {
        PlanFactory::new()
    }
}
