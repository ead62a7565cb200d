pub mod assess;
pub mod validate;
