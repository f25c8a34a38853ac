pub mod hide;
pub mod keygen;
pub mod unveil;
