pub mod generate;
pub mod versions;
