pub mod cloze_area;
pub mod idea_detail;
pub mod idea_list;
pub mod menu;
pub mod options_panel;
