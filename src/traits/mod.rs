pub mod question_store;
