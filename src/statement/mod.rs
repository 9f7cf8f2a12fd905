pub mod assign_statement;
