//! todo-scheduler: personal task scheduler with recurring tasks, Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
