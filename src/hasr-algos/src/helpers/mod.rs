pub mod numeric;
pub mod weighted;
