/// Documentation link resolution for compiled API classes
pub mod config;
pub mod declaration;
pub mod error;
pub mod indexing;
pub mod io;
pub mod link;
pub mod metadata;
pub mod request;
pub mod resolution;
pub mod router;
pub mod server;
pub mod types;

// Explicit exports for better API clarity
pub use config::Settings;
pub use declaration::{ClassDeclaration, ClassEntry, EntryShape, PackageFacadeDeclaration};
pub use error::{
    IndexError, IndexResult, MetadataError, MetadataResult, ResolutionError, ResolutionResult,
};
pub use indexing::{
    ArtifactSource, ArtifactWalker, DeclarationIndex, InMemoryArtifactSource, IndexBuilder,
    IndexStats, PackageFilter, RawClass,
};
pub use link::{LinkBuilder, LinkRepresentation, to_doc_case};
pub use request::ParsedRequest;
pub use router::LinkResolver;
pub use types::{ClassId, ClassKind, DeclarationTypes, MemberKind, MetadataKind};
