// Service exports
pub mod roster;
pub mod supabase;

pub use roster::{RosterCache, RosterError};
pub use supabase::{SupabaseClient, SupabaseError};
