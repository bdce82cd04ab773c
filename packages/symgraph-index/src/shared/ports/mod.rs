//! External collaborator ports
//!
//! The engine talks to the outside world only through these traits: the
//! front end that resolved the program, the dependency metadata map, the
//! graph sink, and the optional progress reporter.

pub mod metadata;
pub mod progress;
pub mod provider;
pub mod sink;

pub use metadata::{DependencyMetadataProvider, MapDependencyProvider, PackageMeta};
pub use progress::{NullProgress, ProgressReporter};
pub use provider::{FileModel, ImportStatement, PackageModel, ProjectModel, SourceModelProvider};
pub use sink::{GraphSink, MemorySink};
