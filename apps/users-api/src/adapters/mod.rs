pub mod users_sea;

pub use users_sea::UserRepoSea;
