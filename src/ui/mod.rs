pub mod heatmap;
pub mod insight;
pub mod panels;
pub mod plot;
pub mod table;
