//! Entity ↔ model mappers

mod reaction;
mod user;
