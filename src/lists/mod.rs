pub mod bidi_list;
pub mod forward_list;
