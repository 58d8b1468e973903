pub mod alias;
pub mod normalize;
