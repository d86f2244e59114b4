pub mod class_or_object;
pub mod expr;
pub mod func;
pub mod import_export;
pub mod kind;
pub mod node;
pub mod stmt;
pub mod stx;
