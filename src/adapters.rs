pub mod adapter;
#[cfg(test)]
pub mod mock;
pub mod s3;
