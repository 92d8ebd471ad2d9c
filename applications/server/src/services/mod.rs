/// Blob store adapters
pub mod local;
pub mod supabase;

pub use local::LocalBlobStore;
pub use supabase::SupabaseBlobStore;
