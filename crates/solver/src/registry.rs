use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::SolverError;
use crate::solver::DynSolver;

/// Name-keyed set of solvers served by one webhook deployment.
///
/// Names are kept sorted so discovery output is stable.
#[derive(Default, Clone)]
pub struct SolverRegistry {
    solvers: BTreeMap<String, Arc<dyn DynSolver>>,
}

impl SolverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a solver under its own name, replacing any previous entry
    /// with the same name.
    pub fn register(&mut self, solver: Arc<dyn DynSolver>) {
        self.solvers.insert(solver.name().to_owned(), solver);
    }

    /// Look up a solver by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn DynSolver>, SolverError> {
        self.solvers
            .get(name)
            .cloned()
            .ok_or_else(|| SolverError::NotFound(name.to_owned()))
    }

    /// Names of all registered solvers, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.solvers.keys().map(String::as_str).collect()
    }

    /// Iterate over all registered solvers.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn DynSolver>> {
        self.solvers.values()
    }

    pub fn len(&self) -> usize {
        self.solvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solvers.is_empty()
    }
}

impl std::fmt::Debug for SolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverRegistry")
            .field("solvers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::LogSolver;

    #[test]
    fn register_and_lookup() {
        let mut registry = SolverRegistry::new();
        registry.register(Arc::new(LogSolver::new("b-solver")));
        registry.register(Arc::new(LogSolver::new("a-solver")));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["a-solver", "b-solver"]);
        assert_eq!(registry.get("a-solver").unwrap().name(), "a-solver");
    }

    #[test]
    fn unknown_name_is_not_found() {
        let registry = SolverRegistry::new();
        assert!(registry.is_empty());
        let err = registry.get("missing").err().unwrap();
        assert!(matches!(err, SolverError::NotFound(ref n) if n == "missing"));
    }

    #[test]
    fn duplicate_name_replaces() {
        let mut registry = SolverRegistry::new();
        registry.register(Arc::new(LogSolver::new("dup")));
        registry.register(Arc::new(LogSolver::new("dup")));
        assert_eq!(registry.len(), 1);
    }
}
