pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod shopping;
pub mod state;

pub use catalog::FoodCatalog;
pub use config::PlannerConfig;
pub use error::{PlannerError, Result};
pub use models::{MealPlan, ShoppingList, UserProfile};
