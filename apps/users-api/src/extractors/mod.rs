pub mod current_claims;

pub use current_claims::CurrentClaims;
