pub mod development;
pub mod insights;
pub mod plan;
