pub mod document_card;
pub mod force_graph;
pub mod search_bar;
pub mod theme_toggle;
