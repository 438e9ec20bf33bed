pub mod calculations;
pub mod db;
pub mod models;
pub mod state;

pub use calculations::{
    PayoffSimulator, PortfolioSummary, SimulationConfig, StrategyComparison, calculate_payoff,
};
pub use db::{KeyValueStore, StoreConfig, StoreError, StoreFactory, StoreRegistry};
pub use models::*;
pub use state::{AppState, DEBTS_STORAGE_KEY, StateError};
