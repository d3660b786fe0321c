mod calldata_tests;
mod types_tests;
