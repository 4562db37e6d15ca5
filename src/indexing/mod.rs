pub mod index;
pub mod progress;
pub mod walker;

pub use index::{DeclarationIndex, IndexBuilder};
pub use progress::IndexStats;
pub use walker::{ArtifactSource, ArtifactWalker, InMemoryArtifactSource, PackageFilter, RawClass};
