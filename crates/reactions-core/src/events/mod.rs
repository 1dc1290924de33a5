//! Domain events - emitted when a reaction is created or removed

mod reaction_event;

pub use reaction_event::{ReactionEvent, ReactionEventBody, ReactionEventSink};
