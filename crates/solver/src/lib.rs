pub mod error;
pub mod log;
pub mod registry;
pub mod solver;

pub use error::SolverError;
pub use log::LogSolver;
pub use registry::SolverRegistry;
pub use solver::{DynSolver, Solver};
