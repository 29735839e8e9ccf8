mod environment;

pub use environment::EnvironmentResource;
