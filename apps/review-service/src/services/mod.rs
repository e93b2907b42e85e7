//! Business logic services

pub mod review;
