pub mod array_list;
#[cfg(feature = "bitvec")]
pub mod bit_array;
pub mod ring_buffer;
pub mod string_buffer;
