pub mod mini_bar;
pub mod visualizer;
