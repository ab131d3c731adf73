//! different utility modules used throughout the project
/// tiny module to save sampled curve into txt or csv file
pub mod logger;
/// tiny module to plot sampled curve
pub mod plots;
/// parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" into HashMap
pub mod task_parser;
