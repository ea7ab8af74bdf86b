// Composition root for the activity feed.
//
// Responsibilities
// - Read configuration from YAML and the environment.
// - Instantiate the concrete feed provider from that configuration.

pub mod config;
