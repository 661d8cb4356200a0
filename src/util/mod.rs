pub mod backend;
pub mod labels;
pub mod tar;
