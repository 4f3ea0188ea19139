pub mod plan_factory;
pub mod row_factory;

pub use plan_factory::PlanFactory;
pub use row_factory::RowFactory;

#[cfg(test)]
mod plan_factory_test;
#[cfg(test)]
mod row_factory_test;
