pub mod refresh_token;
pub mod seaql_migration;
pub mod todo_item;
pub mod todo_list;
pub mod user;
