pub mod enums;
pub mod kmeans;
