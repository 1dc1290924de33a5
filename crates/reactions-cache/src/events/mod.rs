//! Reaction event publishing over Redis Pub/Sub.

mod publisher;

pub use publisher::{reaction_channel, RedisEventPublisher};
