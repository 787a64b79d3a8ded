pub mod seed;
pub mod tracks;
