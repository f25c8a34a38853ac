//! Builder style entry points, see [`hide::prepare`] and [`unveil::prepare`].

pub mod hide;
mod shared;
pub mod unveil;

pub use shared::DEFAULT_TOKEN_FILE;
