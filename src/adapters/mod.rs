pub mod example_generator;
pub mod faker_engine;
pub mod sampler;
pub mod schema_transform;

#[cfg(test)]
mod example_generator_test;
#[cfg(test)]
mod schema_transform_test;
