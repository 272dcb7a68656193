pub mod l2;
