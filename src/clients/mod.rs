pub mod identity;
pub mod supabase;

pub use identity::{AuthSession, IdentityError, IdentityProvider, SignUp, VerifiedUser};
pub use supabase::{SupabaseClient, SupabaseConfig};
