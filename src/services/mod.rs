pub mod analysis;
pub mod extraction;
pub mod insight;
pub mod normalize;
pub mod reel_service;
pub mod render;
