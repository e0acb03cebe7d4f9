pub mod archive;
pub mod config;
pub mod export;
pub mod ingest;
pub mod model;
pub mod normalize;
pub mod paths;
pub mod status;
pub mod util;
pub mod warn;
