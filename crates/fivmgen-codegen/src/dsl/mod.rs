//! Text front-ends for query definitions.

pub mod yaml;
