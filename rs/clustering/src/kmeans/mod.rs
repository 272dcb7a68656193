pub mod assignment;
pub mod convergence;
pub mod init;
pub mod kmeans;
pub mod update;
