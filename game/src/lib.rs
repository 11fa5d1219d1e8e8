pub mod board;
pub mod match_core;
pub mod movelog;
pub mod replay;
pub mod report;
pub mod rules;
pub mod session;
pub mod view;
