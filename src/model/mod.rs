pub mod data_core;
pub mod mutate;
pub mod node;
pub mod path;
pub mod shadow_tree;
