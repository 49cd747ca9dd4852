//! Pipeline integration tests

mod pipeline_tests;
