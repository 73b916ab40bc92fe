mod configuration;
mod form;
mod module_selector;
mod project;
mod store;

pub use configuration::{DEFAULT_RUNTIME_OPTIONS, ModuleRef, RunConfiguration};
pub use form::{ConfigurationForm, FormField};
pub use module_selector::{ModuleSelector, ProjectModuleSelector};
pub use project::Project;
pub use store::RunConfigurationStore;

#[cfg(test)]
pub(crate) use form::tests::form_for;
