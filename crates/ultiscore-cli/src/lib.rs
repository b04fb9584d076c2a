// Library root: configuration and game-log loading for the `ultiscore`
// binary, exposed for integration tests.

pub mod config;
pub mod gamelog;
