pub mod error;
pub mod memory;
pub mod profile_repo;

pub use error::{RepoError, RepoResult};
pub use memory::InMemoryProfileRepo;
pub use profile_repo::{NewProfile, PgProfileRepo, ProfilePatch, ProfileRepository, ProfileRow};
