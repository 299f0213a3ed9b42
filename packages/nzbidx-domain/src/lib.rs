pub mod age;
pub mod bytes;
pub mod category;
pub mod completion;
pub mod pagination;
pub mod subject;
