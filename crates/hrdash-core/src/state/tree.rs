// ── Root state aggregator ──

use hrdash_api::{Department, Dependent, Employee, Project, Resource};

use super::{AuthState, OperationState, ResourceState, Slice};

/// Every slice of dashboard state, each behind its own `watch` channel.
pub struct StateTree {
    pub auth: Slice<AuthState>,
    pub logout: Slice<OperationState>,
    pub change_password: Slice<OperationState>,
    pub user: Slice<OperationState>,
    pub departments: Slice<ResourceState<Department>>,
    pub employees: Slice<ResourceState<Employee>>,
    pub projects: Slice<ResourceState<Project>>,
    pub dependents: Slice<ResourceState<Dependent>>,
}

/// A point-in-time copy of the whole tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootState {
    pub auth: AuthState,
    pub logout: OperationState,
    pub change_password: OperationState,
    pub user: OperationState,
    pub departments: ResourceState<Department>,
    pub employees: ResourceState<Employee>,
    pub projects: ResourceState<Project>,
    pub dependents: ResourceState<Dependent>,
}

impl StateTree {
    pub fn new(auth: AuthState) -> Self {
        Self {
            auth: Slice::new(auth),
            logout: Slice::new(OperationState::default()),
            change_password: Slice::new(OperationState::default()),
            user: Slice::new(OperationState::default()),
            departments: Slice::new(ResourceState::default()),
            employees: Slice::new(ResourceState::default()),
            projects: Slice::new(ResourceState::default()),
            dependents: Slice::new(ResourceState::default()),
        }
    }

    pub fn snapshot(&self) -> RootState {
        RootState {
            auth: self.auth.get(),
            logout: self.logout.get(),
            change_password: self.change_password.get(),
            user: self.user.get(),
            departments: self.departments.get(),
            employees: self.employees.get(),
            projects: self.projects.get(),
            dependents: self.dependents.get(),
        }
    }

    /// The container for entity family `R`.
    pub fn resource<R: TreeResource>(&self) -> &Slice<ResourceState<R>> {
        R::slice(self)
    }
}

impl Default for StateTree {
    fn default() -> Self {
        Self::new(AuthState::default())
    }
}

/// Entity families that have a container in the tree.
pub trait TreeResource: Resource {
    fn slice(tree: &StateTree) -> &Slice<ResourceState<Self>>;
}

impl TreeResource for Department {
    fn slice(tree: &StateTree) -> &Slice<ResourceState<Self>> {
        &tree.departments
    }
}

impl TreeResource for Employee {
    fn slice(tree: &StateTree) -> &Slice<ResourceState<Self>> {
        &tree.employees
    }
}

impl TreeResource for Project {
    fn slice(tree: &StateTree) -> &Slice<ResourceState<Self>> {
        &tree.projects
    }
}

impl TreeResource for Dependent {
    fn slice(tree: &StateTree) -> &Slice<ResourceState<Self>> {
        &tree.dependents
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::state::{OperationEvent, ResourceEvent};

    #[test]
    fn fresh_tree_snapshot_is_default() {
        assert_eq!(StateTree::default().snapshot(), RootState::default());
    }

    #[test]
    fn snapshot_reflects_each_slice() {
        let tree = StateTree::default();
        tree.user.dispatch(OperationEvent::Pending);
        tree.resource::<Project>().dispatch(ResourceEvent::MutationPending);

        let root = tree.snapshot();
        assert!(root.user.loading);
        assert!(root.projects.loading);
        assert!(!root.departments.loading);
        assert!(!root.logout.loading);
    }
}
